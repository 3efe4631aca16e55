//! Core export logic.
//!
//! # Modules
//!
//! - [`extract`] - Key-path extraction of record lists from response bodies
//! - [`pagination`] - Page-by-page traversal of list endpoints
//! - [`transform`] - Flattening of nested records into CSV rows
//! - [`export`] - Dataset specs, CSV writer and run coordination
//!
//! # Export Workflow
//!
//! 1. **Build**: pick the endpoint, fields, extraction path and cursor style
//! 2. **Paginate**: request pages until a short or empty page
//! 3. **Extract**: unwrap the record array from each body
//! 4. **Write**: flatten records and reset or append the CSV file
//! 5. **Report**: collect pages, records and failures per dataset
//!
//! # Example
//!
//! ```rust,no_run
//! use lucca_export::config::load_config;
//! use lucca_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lucca.toml")?;
//! let coordinator = ExportCoordinator::new(&config)?;
//!
//! let report = coordinator.export_all_parallel().await;
//! println!("Records: {}", report.total_records());
//! println!("Failed: {}", report.failed.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod extract;
pub mod pagination;
pub mod transform;
