//! Export coordinator - main orchestrator for the export process
//!
//! For each dataset the coordinator drives a [`Paginator`] and streams every
//! page into the dataset's CSV file: the first page resets the file, later
//! pages append. Runs over all datasets are either sequential (stop at the
//! first failure) or parallel on a bounded pool (collect every outcome).

use crate::adapters::lucca::{ApiClient, LuccaClient};
use crate::config::LuccaConfig;
use crate::core::export::dataset::DatasetSpec;
use crate::core::export::summary::{DatasetReport, ExportReport};
use crate::core::export::writer::{write_records, WriteMode};
use crate::core::pagination::Paginator;
use crate::domain::{Dataset, ExportError, Result};
use chrono::Local;
use futures::TryStreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Export coordinator
///
/// Cheap to clone: clones share the HTTP client, and with it the connection
/// pool and request throttle.
#[derive(Clone)]
pub struct ExportCoordinator {
    client: Arc<dyn ApiClient>,
    output_dir: PathBuf,
    fetch_limit: u32,
    max_workers: usize,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the configured API
    ///
    /// Creates `<output_root>/<YYYY-MM-DD>` (local date).
    pub fn new(config: &LuccaConfig) -> Result<Self> {
        let client = Arc::new(LuccaClient::new(&config.api)?);
        Self::with_client(
            client,
            &config.export.output_root,
            config.api.fetch_limit,
            config.export.max_workers,
        )
    }

    /// Create a coordinator around an existing client
    pub fn with_client(
        client: Arc<dyn ApiClient>,
        output_root: impl AsRef<Path>,
        fetch_limit: u32,
        max_workers: usize,
    ) -> Result<Self> {
        let output_dir = output_root
            .as_ref()
            .join(Local::now().format("%Y-%m-%d").to_string());

        std::fs::create_dir_all(&output_dir).map_err(|e| {
            ExportError::Io(format!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            ))
        })?;

        tracing::debug!(output_dir = %output_dir.display(), "Output directory ready");

        Ok(Self {
            client,
            output_dir,
            fetch_limit,
            max_workers: max_workers.max(1),
        })
    }

    /// Directory receiving this run's CSV files
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export one dataset described by `spec`
    pub async fn export_dataset(&self, spec: DatasetSpec) -> Result<DatasetReport> {
        let start_time = Instant::now();
        crate::log_export_start!(spec.dataset, spec.endpoint);

        let report = self
            .run_dataset(&spec, start_time)
            .await
            .inspect_err(|e| {
                tracing::error!(dataset = %spec.dataset, error = %e, "Export failed");
            })?;

        crate::log_export_complete!(report.dataset, report.pages, report.records, report.duration);
        Ok(report)
    }

    async fn run_dataset(&self, spec: &DatasetSpec, start_time: Instant) -> Result<DatasetReport> {
        let destination = self.output_dir.join(&spec.file_name);
        let paginator = Paginator::new(
            self.client.clone(),
            spec.endpoint.clone(),
            spec.params.clone(),
            spec.path.clone(),
            spec.pagination,
        );

        let mut pages = std::pin::pin!(paginator.into_stream());
        let mut page_count = 0;
        let mut record_count = 0;

        while let Some(page) = pages.try_next().await? {
            write_records(
                &page.records,
                &destination,
                Some(&spec.columns),
                WriteMode::for_page(page.index),
            )?;
            page_count += 1;
            record_count += page.len();
        }

        if page_count == 0 {
            tracing::warn!(dataset = %spec.dataset, "No records returned, writing header only");
            write_records(&[], &destination, Some(&spec.columns), WriteMode::Reset)?;
        }

        Ok(DatasetReport {
            dataset: spec.dataset,
            path: destination,
            pages: page_count,
            records: record_count,
            duration: start_time.elapsed(),
        })
    }

    /// Export one dataset with the configured page size
    pub async fn export(&self, dataset: Dataset) -> Result<DatasetReport> {
        self.export_dataset(DatasetSpec::for_dataset(dataset, self.fetch_limit))
            .await
    }

    pub async fn export_users(&self) -> Result<DatasetReport> {
        self.export(Dataset::Users).await
    }

    pub async fn export_departments(&self) -> Result<DatasetReport> {
        self.export(Dataset::Departments).await
    }

    pub async fn export_contracts(&self) -> Result<DatasetReport> {
        self.export(Dataset::Contracts).await
    }

    /// Export users, contracts and departments one after the other
    ///
    /// # Errors
    ///
    /// The first failure aborts the run; later datasets are not attempted.
    pub async fn export_all(&self) -> Result<Vec<DatasetReport>> {
        let mut reports = Vec::with_capacity(Dataset::ALL.len());
        for dataset in Dataset::ALL {
            reports.push(self.export(dataset).await?);
        }
        Ok(reports)
    }

    /// Export every dataset concurrently on at most `max_workers` tasks
    ///
    /// Every task is joined. Failures, panics included, end up in the
    /// returned report.
    pub async fn export_all_parallel(&self) -> ExportReport {
        let start_time = Instant::now();
        let workers = Dataset::ALL.len().min(self.max_workers);
        let semaphore = Arc::new(Semaphore::new(workers));

        tracing::info!(workers, "Starting parallel export");

        let handles: Vec<_> = Dataset::ALL
            .into_iter()
            .map(|dataset| {
                let coordinator = self.clone();
                let semaphore = semaphore.clone();
                let handle = tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| ExportError::Task(e.to_string()))?;
                    coordinator.export(dataset).await
                });
                (dataset, handle)
            })
            .collect();

        let mut report = ExportReport::new();
        for (dataset, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ExportError::Task(format!("{dataset} export: {e}"))),
            };
            report.record(dataset, outcome);
        }

        let report = report.with_duration(start_time.elapsed());
        report.log_summary();
        report
    }
}
