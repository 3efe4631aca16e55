//! Logging
//!
//! Console output plus an optional append-only log file, both driven by
//! `tracing`.
//!
//! # Example
//!
//! ```no_run
//! use lucca_export::logging::init_logging;
//! use lucca_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Initialisation");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a dataset export
///
/// # Example
///
/// ```no_run
/// use lucca_export::log_export_start;
/// use lucca_export::domain::Dataset;
///
/// log_export_start!(Dataset::Users, "/api/v3/users");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($dataset:expr, $endpoint:expr) => {
        tracing::info!(
            dataset = %$dataset,
            endpoint = %$endpoint,
            "Starting export"
        );
    };
}

/// Log the completion of a dataset export
///
/// # Example
///
/// ```no_run
/// use lucca_export::log_export_complete;
/// use lucca_export::domain::Dataset;
/// use std::time::Duration;
///
/// log_export_complete!(Dataset::Departments, 2, 140, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($dataset:expr, $pages:expr, $records:expr, $duration:expr) => {
        tracing::info!(
            dataset = %$dataset,
            pages = $pages,
            records = $records,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use lucca_export::log_retry_attempt;
/// use std::time::Duration;
///
/// log_retry_attempt!("/api/v3/users", 1, 3, "HTTP 429", Duration::from_millis(1100));
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($endpoint:expr, $attempt:expr, $max_attempts:expr, $reason:expr, $delay:expr) => {
        tracing::warn!(
            endpoint = %$endpoint,
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            delay_ms = $delay.as_millis() as u64,
            "Retrying request"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::Dataset;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_export_start!(Dataset::Users, "/api/v3/users");
        log_export_complete!(Dataset::Users, 1usize, 3usize, Duration::from_millis(12));
        log_retry_attempt!("/api/v3/users", 1u32, 3u32, "HTTP 503", Duration::ZERO);
    }
}
