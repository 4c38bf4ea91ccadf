// Sheetmask - Field-level de-identification for HR and equity spreadsheets
// Copyright (c) 2025 Sheetmask Contributors
// Licensed under the MIT License

use clap::Parser;
use sheetmask::cli::{Cli, Commands};
use sheetmask::config::{load_config_or_default, LoggingConfig};
use sheetmask::logging::{init_logging, sanitize_message};
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging settings come from the config file when it loads; command
    // execution reports configuration errors on its own
    let file_config = load_config_or_default(cli.config.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", sanitize_message(&e.to_string()));
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sheetmask - Field-level de-identification for spreadsheets"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            let message = sanitize_message(&format!("{e:#}"));
            tracing::error!(error = %message, "Command execution failed");
            eprintln!("Error: {message}");
            5
        }
    };

    // process::exit skips destructors, so flush the file log first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Anonymize(args) => args.execute(config_path).await,
        Commands::Analyze(args) => args.execute(config_path).await,
        Commands::ValidateConfig(args) => args.execute(config_path).await,
        Commands::Init(args) => args.execute().await,
    }
}
