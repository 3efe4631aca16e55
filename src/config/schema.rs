//! Configuration schema types
//!
//! Every section has serde defaults so that a run can be configured from
//! environment variables alone.

use crate::config::SecretString;
use serde::Deserialize;

/// Largest accepted page size
pub const MAX_FETCH_LIMIT: u32 = 1000;

/// Upper bound for the parallel worker pool
pub const MAX_WORKERS: usize = 10;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LuccaConfig {
    /// HR API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output and concurrency settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LuccaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// HR API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Root URL prepended to every endpoint path
    #[serde(default)]
    pub base_url: String,

    /// Application key sent in the authorization header
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Page size used by every dataset
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Client-side request budget shared by all exports (0 disables)
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("api.base_url cannot be empty (set BASE_URL)".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url is not a valid URL: {e}"))?;

        match &self.api_key {
            Some(key) if !key.expose_secret().is_blank() => {}
            _ => return Err("api.api_key cannot be empty (set API_KEY)".to_string()),
        }

        if self.fetch_limit == 0 || self.fetch_limit > MAX_FETCH_LIMIT {
            return Err(format!(
                "api.fetch_limit must be between 1 and {MAX_FETCH_LIMIT}, got {}",
                self.fetch_limit
            ));
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            fetch_limit: default_fetch_limit(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

/// Output and concurrency settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory under which dated output folders are created
    #[serde(default = "default_output_root")]
    pub output_root: String,

    /// Worker pool cap for parallel runs
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_root.trim().is_empty() {
            return Err("export.output_root cannot be empty".to_string());
        }

        if self.max_workers == 0 || self.max_workers > MAX_WORKERS {
            return Err(format!(
                "export.max_workers must be between 1 and {MAX_WORKERS}, got {}",
                self.max_workers
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            max_workers: default_max_workers(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append-only log file; empty disables file logging
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_requests_per_minute() -> u32 {
    50
}

fn default_output_root() -> String {
    "Results".to_string()
}

fn default_max_workers() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "api.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> LuccaConfig {
        LuccaConfig {
            api: ApiConfig {
                base_url: "https://example.ilucca.net".to_string(),
                api_key: Some(secret_string("key".to_string())),
                ..ApiConfig::default()
            },
            ..LuccaConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = LuccaConfig::default();
        assert_eq!(config.api.fetch_limit, 100);
        assert_eq!(config.api.requests_per_minute, 50);
        assert_eq!(config.export.output_root, "Results");
        assert_eq!(config.export.max_workers, 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.log_file, "api.log");
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_base_url_rejected() {
        let mut config = valid_config();
        config.api.base_url = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.contains("BASE_URL"));
    }

    #[test]
    fn test_base_url_scheme_required() {
        let mut config = valid_config();
        config.api.base_url = "example.ilucca.net".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let mut config = valid_config();
        config.api.api_key = None;
        assert!(config.validate().unwrap_err().contains("API_KEY"));

        config.api.api_key = Some(secret_string("  ".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fetch_limit_bounds() {
        let mut config = valid_config();
        config.api.fetch_limit = 0;
        assert!(config.validate().is_err());
        config.api.fetch_limit = MAX_FETCH_LIMIT + 1;
        assert!(config.validate().is_err());
        config.api.fetch_limit = MAX_FETCH_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_workers_bounds() {
        let mut config = valid_config();
        config.export.max_workers = 0;
        assert!(config.validate().is_err());
        config.export.max_workers = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_sections_from_toml() {
        let config: LuccaConfig = toml::from_str(
            r#"
[api]
base_url = "https://example.ilucca.net"
api_key = "secret"
fetch_limit = 250

[export]
output_root = "/tmp/out"
"#,
        )
        .unwrap();

        assert_eq!(config.api.fetch_limit, 250);
        assert_eq!(config.export.output_root, "/tmp/out");
        assert_eq!(config.export.max_workers, 3);
        assert!(config.validate().is_ok());
    }
}
