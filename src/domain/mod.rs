//! Domain types for the exporter.
//!
//! - **Datasets** ([`Dataset`]) with their endpoints, fields and file names
//! - **Error types** ([`ExportError`], [`HttpError`], [`ExtractionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExportError>`]:
//!
//! ```rust
//! use lucca_export::domain::{Dataset, ExportError, Result};
//! use std::str::FromStr;
//!
//! fn parse(name: &str) -> Result<Dataset> {
//!     Dataset::from_str(name).map_err(ExportError::Configuration)
//! }
//!
//! assert_eq!(parse("users").unwrap(), Dataset::Users);
//! ```

pub mod dataset;
pub mod errors;
pub mod result;

pub use dataset::Dataset;
pub use errors::{ExportError, ExtractionError, HttpError};
pub use result::Result;
