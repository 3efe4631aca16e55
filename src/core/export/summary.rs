//! Export reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{Dataset, ExportError};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one successful dataset export
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    /// Exported dataset
    pub dataset: Dataset,

    /// CSV file written
    pub path: PathBuf,

    /// Number of pages fetched
    pub pages: usize,

    /// Number of records written
    pub records: usize,

    /// Wall-clock duration of the export
    pub duration: Duration,
}

/// Dataset export that failed
#[derive(Debug)]
pub struct DatasetFailure {
    /// Dataset that failed
    pub dataset: Dataset,

    /// Cause
    pub error: ExportError,
}

/// Aggregated outcome of a multi-dataset run
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Successful exports in completion order
    pub succeeded: Vec<DatasetReport>,

    /// Failed exports
    pub failed: Vec<DatasetFailure>,

    /// Duration of the whole run
    pub duration: Duration,
}

impl ExportReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records the outcome of one dataset
    pub fn record(&mut self, dataset: Dataset, outcome: Result<DatasetReport, ExportError>) {
        match outcome {
            Ok(report) => self.succeeded.push(report),
            Err(error) => self.failed.push(DatasetFailure { dataset, error }),
        }
    }

    /// True when no dataset failed
    pub fn is_successful(&self) -> bool {
        self.failed.is_empty()
    }

    /// Records written across successful datasets
    pub fn total_records(&self) -> usize {
        self.succeeded.iter().map(|r| r.records).sum()
    }

    /// Report for `dataset`, if it succeeded
    pub fn get(&self, dataset: Dataset) -> Option<&DatasetReport> {
        self.succeeded.iter().find(|r| r.dataset == dataset)
    }

    /// Failure for `dataset`, if it failed
    pub fn failure(&self, dataset: Dataset) -> Option<&DatasetFailure> {
        self.failed.iter().find(|f| f.dataset == dataset)
    }

    /// Log the report
    pub fn log_summary(&self) {
        tracing::info!(
            succeeded = self.succeeded.len(),
            failed = self.failed.len(),
            total_records = self.total_records(),
            duration_secs = self.duration.as_secs(),
            "Export run completed"
        );

        for report in &self.succeeded {
            tracing::info!(
                dataset = %report.dataset,
                pages = report.pages,
                records = report.records,
                path = %report.path.display(),
                "Dataset exported"
            );
        }

        if !self.failed.is_empty() {
            tracing::warn!(
                error_count = self.failed.len(),
                "Export run completed with errors"
            );
            for failure in &self.failed {
                tracing::warn!(
                    dataset = %failure.dataset,
                    error = %failure.error,
                    "Dataset export failed"
                );
            }
        }
    }
}
