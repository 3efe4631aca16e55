//! Export command implementation
//!
//! Runs the selected datasets and prints the path of every CSV written.
//! Returns the process exit code: 0 on success, 1 when any dataset failed.

use crate::cli::ExportTarget;
use crate::config::LuccaConfig;
use crate::core::export::{DatasetReport, ExportCoordinator};

/// The `export` command
#[derive(Debug, Clone, Copy)]
pub struct ExportCommand {
    target: ExportTarget,
}

impl ExportCommand {
    pub fn new(target: ExportTarget) -> Self {
        Self { target }
    }

    /// Execute the export command
    pub async fn execute(&self, config: &LuccaConfig) -> anyhow::Result<i32> {
        tracing::info!(export_target = %self.target, "Starting export command");

        let coordinator = ExportCoordinator::new(config)?;
        self.run(&coordinator).await
    }

    /// Execute against an existing coordinator
    pub async fn run(&self, coordinator: &ExportCoordinator) -> anyhow::Result<i32> {
        match self.target {
            ExportTarget::Single(dataset) => match coordinator.export(dataset).await {
                Ok(report) => {
                    print_written(&report);
                    Ok(0)
                }
                Err(e) => {
                    eprintln!("Error exporting {dataset}: {e}");
                    Ok(1)
                }
            },
            ExportTarget::AllSequential => match coordinator.export_all().await {
                Ok(reports) => {
                    reports.iter().for_each(print_written);
                    Ok(0)
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    Ok(1)
                }
            },
            ExportTarget::AllParallel => {
                let report = coordinator.export_all_parallel().await;
                report.succeeded.iter().for_each(print_written);
                for failure in &report.failed {
                    eprintln!("Error exporting {}: {}", failure.dataset, failure.error);
                }
                Ok(if report.is_successful() { 0 } else { 1 })
            }
        }
    }
}

fn print_written(report: &DatasetReport) {
    println!("CSV written to {}", report.path.display());
}
