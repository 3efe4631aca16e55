//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap. The target
//! is kept as free text so that a missing or unknown value can fall back to
//! the usage message instead of a parse error.

pub mod commands;

use crate::domain::Dataset;
use clap::Parser;
use std::fmt;
use std::str::FromStr;

/// Printed when no valid target is given
pub const USAGE: &str = "\
Usage: lucca-export [--config PATH] [--log-level LEVEL] <TARGET>

Targets:
  all_sequential  export users, contracts and departments one after the other
  all             export every dataset in parallel
  users           export users
  contracts       export work contracts
  departments     export departments";

/// Lucca Export - HR directory to CSV export tool
#[derive(Parser, Debug)]
#[command(name = "lucca-export")]
#[command(version, about, long_about = None)]
#[command(author = "Lucca Export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lucca.toml", env = "LUCCA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LUCCA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// What to export: all_sequential, all, users, contracts or departments
    pub target: Option<String>,
}

impl Cli {
    /// Parsed target, `None` when missing or unknown
    pub fn export_target(&self) -> Option<ExportTarget> {
        self.target.as_deref().and_then(|t| t.parse().ok())
    }
}

/// Selection of datasets for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// Every dataset, one after the other
    AllSequential,
    /// Every dataset on the worker pool
    AllParallel,
    /// One dataset
    Single(Dataset),
}

impl FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all_sequential" => Ok(ExportTarget::AllSequential),
            "all" => Ok(ExportTarget::AllParallel),
            other => Dataset::from_str(other)
                .map(ExportTarget::Single)
                .map_err(|_| format!("Unknown target: {other}")),
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::AllSequential => f.write_str("all_sequential"),
            ExportTarget::AllParallel => f.write_str("all"),
            ExportTarget::Single(dataset) => write!(f, "{dataset}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["lucca-export", "users"]);
        assert_eq!(cli.config, "lucca.toml");
        assert_eq!(cli.target.as_deref(), Some("users"));
    }

    #[test]
    fn test_cli_parse_with_config_and_level() {
        let cli = Cli::parse_from([
            "lucca-export",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "all",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert_eq!(cli.export_target(), Some(ExportTarget::AllParallel));
    }

    #[test]
    fn test_missing_target() {
        let cli = Cli::parse_from(["lucca-export"]);
        assert_eq!(cli.export_target(), None);
    }

    #[test]
    fn test_unknown_target() {
        let cli = Cli::parse_from(["lucca-export", "payroll"]);
        assert_eq!(cli.export_target(), None);
    }

    #[test_case("all_sequential", ExportTarget::AllSequential ; "sequential")]
    #[test_case("all", ExportTarget::AllParallel ; "parallel")]
    #[test_case("users", ExportTarget::Single(Dataset::Users) ; "users")]
    #[test_case("contracts", ExportTarget::Single(Dataset::Contracts) ; "contracts")]
    #[test_case("departments", ExportTarget::Single(Dataset::Departments) ; "departments")]
    fn test_target_round_trip(name: &str, expected: ExportTarget) {
        let target: ExportTarget = name.parse().unwrap();
        assert_eq!(target, expected);
        assert_eq!(target.to_string(), name);
    }

    #[test]
    fn test_usage_lists_every_target() {
        for name in ["all_sequential", "all", "users", "contracts", "departments"] {
            assert!(USAGE.contains(name));
        }
    }
}
