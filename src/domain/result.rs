//! Result type alias for the exporter

use super::errors::ExportError;

/// Result type alias using [`ExportError`]
///
/// # Examples
///
/// ```
/// use lucca_export::domain::result::Result;
/// use lucca_export::domain::errors::ExportError;
///
/// fn failing_function() -> Result<()> {
///     Err(ExportError::Configuration("API_KEY is not set".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;
