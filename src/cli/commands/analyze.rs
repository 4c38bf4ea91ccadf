//! Analyze command implementation
//!
//! This module implements the `analyze` command, which classifies the columns
//! of a spreadsheet and prints the suggested selection without writing anything.

use crate::anonymization::{AnonymizationEngine, AnonymizationSession};
use crate::config::load_config_or_default;
use crate::io::{load_sheet, InputLimits};
use crate::log_error_with_context;
use crate::logging::ActivityLog;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Spreadsheet to analyze (.csv)
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Analyzing spreadsheet");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let engine = match AnonymizationEngine::new(config.anonymization.clone()) {
            Ok(engine) => Arc::new(engine),
            Err(e) => {
                println!("❌ Failed to initialize anonymization engine");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        let limits = InputLimits::from_config(&config.input);
        let loaded = match load_sheet(&self.input, &limits).await {
            Ok(loaded) => loaded,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load source sheet");
                println!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let activity = ActivityLog::new(config.logging.activity_log_capacity);
        let session =
            match AnonymizationSession::analyze(engine, loaded.file_name, loaded.sheet, activity) {
                Ok(session) => session,
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(e.exit_code());
                }
            };

        let report = session.report();
        if self.json {
            println!("{}", report.format_json()?);
        } else {
            println!("{}", report.format_console());
            println!(
                "Run `sheetmask anonymize {} --mode <MODE>` to apply this selection.",
                self.input.display()
            );
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            input: dir.path().join("missing.csv"),
            json: false,
        };
        let config = dir.path().join("sheetmask.toml");
        std::fs::write(&config, "").unwrap();

        assert_eq!(args.execute(Some(&config)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_analyze_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hr.csv");
        std::fs::write(&input, "Employee Name,Salary\nJane,87000\n").unwrap();
        let config = dir.path().join("sheetmask.toml");
        std::fs::write(&config, "").unwrap();

        let args = AnalyzeArgs { input, json: true };
        assert_eq!(args.execute(Some(&config)).await.unwrap(), 0);
    }
}
