//! Configuration management.
//!
//! The exporter is configured from the environment, with an optional TOML
//! file underneath.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lucca_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let _ = dotenvy::dotenv();
//! let config = load_config("lucca.toml")?;
//! println!("API: {}", config.api.base_url);
//! println!("Page size: {}", config.api.fetch_limit);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! | variable | setting | default |
//! |---|---|---|
//! | `BASE_URL` | `api.base_url` | required |
//! | `API_KEY` | `api.api_key` | required |
//! | `FETCH_LIMIT` | `api.fetch_limit` | 100 |
//! | `REQUESTS_PER_MINUTE` | `api.requests_per_minute` | 50 |
//! | `OUTPUT_ROOT` | `export.output_root` | `Results` |
//! | `MAX_WORKERS` | `export.max_workers` | 3 |
//! | `LOG_LEVEL` | `logging.level` | `info` |
//! | `LOG_FILE` | `logging.log_file` | `api.log` |
//!
//! Any of them can be prefixed with `LUCCA_`; the prefixed form wins.
//!
//! # Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://example.ilucca.net"
//! api_key = "${LUCCA_API_KEY}"
//! fetch_limit = 100
//!
//! [export]
//! output_root = "Results"
//! max_workers = 3
//!
//! [logging]
//! level = "info"
//! log_file = "api.log"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{ApiConfig, ExportConfig, LoggingConfig, LuccaConfig};
pub use secret::{secret_string, SecretString, SecretValue};
