//! Export orchestration
//!
//! This module provides the export logic, including:
//! - Per-dataset request parameters
//! - CSV output
//! - Coordination of sequential and parallel runs
//! - Reporting

pub mod coordinator;
pub mod dataset;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use dataset::DatasetSpec;
pub use summary::{DatasetFailure, DatasetReport, ExportReport};
pub use writer::{write_records, WriteMode};
