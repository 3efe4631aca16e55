//! Configuration loader
//!
//! Settings come from the environment (usually populated from `.env` by
//! `dotenvy`), optionally layered over a TOML file. Each variable may be
//! given bare (`BASE_URL`) or with the `LUCCA_` prefix, which wins.

use super::schema::LuccaConfig;
use crate::config::secret_string;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const ENV_PREFIX: &str = "LUCCA_";

/// Loads and validates the configuration
///
/// 1. Reads the TOML file if it exists (a missing file is not an error)
/// 2. Substitutes `${VAR}` placeholders in the file
/// 3. Applies environment overrides
/// 4. Validates the result
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] if the file cannot be parsed, a
/// placeholder or numeric variable is invalid, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use lucca_export::config::load_config;
///
/// let config = load_config("lucca.toml").expect("Failed to load config");
/// println!("Fetching from {}", config.api.base_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LuccaConfig> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            ExportError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let contents = substitute_env_vars(&contents)?;
        toml::from_str(&contents)?
    } else {
        tracing::debug!(
            path = %path.display(),
            "No configuration file, using environment only"
        );
        LuccaConfig::default()
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ExportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes `${VAR_NAME}` placeholders, skipping comment lines
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let replaced = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&replaced);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `LUCCA_<NAME>`, falling back to `<NAME>`
fn env_var(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}"))
        .or_else(|_| std::env::var(name))
        .ok()
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ExportError::Configuration(format!("{name} must be a number, got '{value}'"))
    })
}

/// Applies environment overrides on top of file values
fn apply_env_overrides(config: &mut LuccaConfig) -> Result<()> {
    if let Some(val) = env_var("BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = env_var("API_KEY") {
        config.api.api_key = Some(secret_string(val));
    }
    if let Some(val) = env_var("FETCH_LIMIT") {
        config.api.fetch_limit = parse_env("FETCH_LIMIT", &val)?;
    }
    if let Some(val) = env_var("REQUESTS_PER_MINUTE") {
        config.api.requests_per_minute = parse_env("REQUESTS_PER_MINUTE", &val)?;
    }

    if let Some(val) = env_var("OUTPUT_ROOT") {
        config.export.output_root = val;
    }
    if let Some(val) = env_var("MAX_WORKERS") {
        config.export.max_workers = parse_env("MAX_WORKERS", &val)?;
    }

    if let Some(val) = env_var("LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = env_var("LOG_FILE") {
        config.logging.log_file = val;
    }

    Ok(())
}
