// Lucca Export - HR directory to CSV export tool
// Copyright (c) 2025 Lucca Export Contributors
// Licensed under the MIT License

//! # Lucca Export - HR directory to CSV
//!
//! Lucca Export pulls users, departments and work contracts from the Lucca
//! HR REST API and writes each collection to a flat CSV file.
//!
//! ## Overview
//!
//! This library provides:
//! - **Fetching** list endpoints page by page, with retries on transient
//!   statuses and a shared client-side request budget
//! - **Extracting** the record array from each response body along a typed
//!   key path
//! - **Flattening** nested records into dotted CSV columns
//! - **Coordinating** sequential and bounded-parallel runs over all datasets
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pagination, extraction, transformation and export
//! - [`adapters`] - Lucca HTTP client, retry policy and throttle
//! - [`domain`] - Datasets and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Console and file logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lucca_export::config::load_config;
//! use lucca_export::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("lucca.toml")?;
//!     let coordinator = ExportCoordinator::new(&config)?;
//!
//!     let report = coordinator.export_users().await?;
//!     println!("CSV written to {}", report.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! Cursors are explicit values. The paginator stops after the first page
//! holding fewer records than the page size, or on an empty body:
//!
//! ```rust,no_run
//! use lucca_export::adapters::lucca::LuccaClient;
//! use lucca_export::core::extract::JsonPath;
//! use lucca_export::core::pagination::{PaginationStyle, Paginator};
//! use std::sync::Arc;
//!
//! # async fn example(client: Arc<LuccaClient>) -> lucca_export::domain::Result<()> {
//! let mut pages = Paginator::new(
//!     client,
//!     "/api/v3/departments",
//!     vec![("fields".to_string(), "id,name".to_string())],
//!     JsonPath::new(["data", "items"]),
//!     PaginationStyle::offset(100),
//! );
//! while let Some(page) = pages.next_page().await? {
//!     println!("page {} holds {} records", page.index, page.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible library operations return [`domain::Result`], whose error
//! type [`domain::ExportError`] keeps HTTP and extraction failures typed and
//! tagged with the endpoint they came from.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
