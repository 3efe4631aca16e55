// Lucca Export - HR directory to CSV export tool
// Copyright (c) 2025 Lucca Export Contributors
// Licensed under the MIT License

use clap::Parser;
use lucca_export::cli::commands::ExportCommand;
use lucca_export::cli::{Cli, USAGE};
use lucca_export::config::load_config;
use lucca_export::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some(target) = cli.export_target() else {
        println!("{USAGE}");
        process::exit(0);
    };

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    let guard = match init_logging(&config.logging.level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        export_target = %target,
        "Initialisation"
    );

    let exit_code = match ExportCommand::new(target).execute(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            1
        }
    };

    // Flush the file writer before exiting
    drop(guard);
    process::exit(exit_code);
}
