//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. HTTP and
//! extraction failures get their own enums so callers can tell a transport
//! problem from an API contract mismatch; both are wrapped by [`ExportError`]
//! together with the endpoint they happened on. Third-party error types are
//! converted to strings at the boundary.

use thiserror::Error;

/// Main exporter error type
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request against the HR API failed
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        /// Endpoint path the request targeted
        endpoint: String,
        /// Underlying HTTP failure
        #[source]
        source: HttpError,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {source}")]
    Extraction {
        /// Endpoint path the body came from
        endpoint: String,
        /// Underlying extraction failure
        #[source]
        source: ExtractionError,
    },

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A spawned export task could not be joined
    #[error("Export task failed: {0}")]
    Task(String),
}

/// HTTP client errors
///
/// Retryable statuses only surface here once the retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The request URL could not be built
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Connection-level failure (DNS, refused, reset, TLS)
    #[error("Connection failed: {0}")]
    Transport(String),

    /// Connect or response timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-retryable error status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Retryable status persisted after every retry
    #[error("HTTP {status} after {attempts} attempts")]
    RetriesExhausted { status: u16, attempts: u32 },

    /// Body was not valid JSON
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    /// Whether a fresh attempt may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, HttpError::Transport(_) | HttpError::Timeout(_))
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_decode() {
            HttpError::Decode(err.to_string())
        } else {
            HttpError::Transport(err.to_string())
        }
    }
}

/// Errors raised while walking a response body along a key path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The container had the right shape but not the key
    #[error("key '{key}' not found at depth {depth}")]
    NotFound { key: String, depth: usize },

    /// The value at `depth` cannot be indexed by `key`
    #[error("cannot index {found} with '{key}' at depth {depth}")]
    WrongShape {
        key: String,
        depth: usize,
        found: &'static str,
    },

    /// The value at the end of the path is not a list of records
    #[error("value at '{path}' is {found}, expected an array of records")]
    NotAnArray { path: String, found: &'static str },
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let err = ExportError::Configuration("BASE_URL is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: BASE_URL is not set");
    }

    #[test]
    fn test_http_error_display_includes_endpoint() {
        let err = ExportError::Http {
            endpoint: "/api/v3/users".to_string(),
            source: HttpError::Status {
                status: 401,
                body: "unauthorized".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Request to /api/v3/users failed: HTTP 401: unauthorized"
        );
    }

    #[test]
    fn test_extraction_error_source_is_kept() {
        use std::error::Error as _;

        let err = ExportError::Extraction {
            endpoint: "/api/v3/departments".to_string(),
            source: ExtractionError::NotFound {
                key: "items".to_string(),
                depth: 1,
            },
        };
        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "key 'items' not found at depth 1");
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = HttpError::RetriesExhausted {
            status: 429,
            attempts: 4,
        };
        assert_eq!(err.to_string(), "HTTP 429 after 4 attempts");
    }

    #[test]
    fn test_transient_classification() {
        assert!(HttpError::Timeout("read".to_string()).is_transient());
        assert!(HttpError::Transport("reset".to_string()).is_transient());
        assert!(!HttpError::Decode("eof".to_string()).is_transient());
        assert!(!HttpError::Status {
            status: 404,
            body: String::new()
        }
        .is_transient());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ExportError = io_err.into();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ExportError = toml_err.into();
        assert!(matches!(err, ExportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
