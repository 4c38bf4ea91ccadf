//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Sheetmask using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sheetmask - field-level de-identification for HR and equity spreadsheets
#[derive(Parser, Debug)]
#[command(name = "sheetmask")]
#[command(version, about, long_about = None)]
#[command(author = "Sheetmask Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./sheetmask.toml when present)
    #[arg(short, long, env = "SHEETMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHEETMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a spreadsheet and write the mapping ledger
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Classify the columns of a spreadsheet without changing it
    Analyze(commands::analyze::AnalyzeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::AnonymizationMode;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["sheetmask", "anonymize", "hr.csv"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, PathBuf::from("hr.csv"));
                assert!(args.mode.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_anonymize_options() {
        let cli = Cli::parse_from([
            "sheetmask",
            "anonymize",
            "hr.csv",
            "--mode",
            "range",
            "--select",
            "3,Notes",
            "--deselect",
            "1",
            "--output-dir",
            "out",
        ]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.mode, Some(AnonymizationMode::Range));
                assert_eq!(args.select.as_deref(), Some("3,Notes"));
                assert_eq!(args.deselect.as_deref(), Some("1"));
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["sheetmask", "anonymize", "hr.csv", "--mode", "fuzzy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["sheetmask", "--config", "custom.toml", "analyze", "hr.csv"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["sheetmask", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["sheetmask", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sheetmask", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
