//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: load a sheet, classify its
//! columns, apply the user's column overrides, run the selected mode, and
//! write the anonymized sheet plus the mapping ledger.

use crate::anonymization::{AnonymizationEngine, AnonymizationMode, AnonymizationSession};
use crate::config::load_config_or_default;
use crate::io::{codec_for, load_sheet, write_outputs, InputLimits, OutputNames};
use crate::logging::{ActivityLevel, ActivityLog};
use crate::{log_error_with_context, log_run_complete, log_run_start};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Spreadsheet to anonymize (.csv)
    pub input: PathBuf,

    /// Anonymization mode (strict, contextual or range); overrides the config file
    #[arg(short, long)]
    pub mode: Option<AnonymizationMode>,

    /// Columns to add to the suggested selection (1-based numbers or header names, comma-separated)
    #[arg(long, value_name = "COLS")]
    pub select: Option<String>,

    /// Columns to remove from the suggested selection
    #[arg(long, value_name = "COLS")]
    pub deselect: Option<String>,

    /// Anonymize exactly these columns, ignoring the suggestions
    #[arg(long, value_name = "COLS", conflicts_with = "select")]
    pub only: Option<String>,

    /// Directory for the anonymized sheet and the mapping ledger
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let mut anonymization = config.anonymization.clone();
        if let Some(mode) = self.mode {
            tracing::info!(mode = %mode, "Overriding anonymization mode from CLI");
            anonymization.mode = Some(mode);
        }
        let mode = match anonymization.require_mode() {
            Ok(mode) => mode,
            Err(e) => {
                println!("❌ {e}");
                println!("   Use --mode strict|contextual|range or set anonymization.mode");
                return Ok(e.exit_code());
            }
        };

        let engine = match AnonymizationEngine::new(anonymization) {
            Ok(engine) => Arc::new(engine),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize anonymization engine");
                println!("❌ Failed to initialize anonymization engine");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        println!("📂 Loading {}", self.input.display());
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
        let mut session = match AnonymizationSession::analyze(
            Arc::clone(&engine),
            loaded.file_name,
            loaded.sheet,
            activity,
        ) {
            Ok(session) => session,
            Err(e) => {
                log_error_with_context!(&e, "Failed to analyze source sheet");
                println!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        if let Err(message) = self.apply_overrides(&mut session) {
            println!("❌ {message}");
            return Ok(3);
        }

        println!(
            "🔒 Anonymizing {} of {} columns ({} mode)",
            session.selection().selected_count(),
            session.fields().len(),
            mode
        );

        log_run_start!(session.source_name(), mode);
        let started = Instant::now();

        let output = match session.run(mode) {
            Ok(output) => output,
            Err(e) => {
                log_error_with_context!(&e, "Anonymization failed");
                println!("❌ Anonymization failed");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let directory = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone());
        let names = OutputNames::derive(session.source_name());
        let codec = codec_for(&self.input)?;

        let written = match write_outputs(
            &directory,
            &names,
            codec.as_ref(),
            &output.sheet,
            &output.ledger,
        ) {
            Ok(written) => written,
            Err(e) => {
                log_error_with_context!(&e, "Failed to write anonymized sheet");
                println!("❌ Failed to write anonymized sheet");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        log_run_complete!(output.summary.total_substitutions(), started.elapsed());

        println!("{}", output.summary.format_console(engine.registry()));

        for entry in session.activity().entries().filter(|e| {
            matches!(e.level, ActivityLevel::Warning | ActivityLevel::Error)
        }) {
            println!("⚠️  {entry}");
        }

        println!("✅ Anonymized sheet written: {}", written.workbook.display());
        match (&written.ledger, &written.ledger_error) {
            (Some(path), _) => println!("✅ Mapping ledger written: {}", path.display()),
            (None, Some(error)) => {
                println!("⚠️  Mapping ledger could not be written");
                println!("   Error: {error}");
            }
            (None, None) => {}
        }

        Ok(0)
    }

    /// Apply `--only`, `--select` and `--deselect` to the suggested selection
    fn apply_overrides(&self, session: &mut AnonymizationSession) -> Result<(), String> {
        if let Some(ref spec) = self.only {
            let columns = resolve_columns(session, spec)?;
            session.clear_all();
            for index in columns {
                session.select(index);
            }
        }

        if let Some(ref spec) = self.select {
            for index in resolve_columns(session, spec)? {
                session.select(index);
            }
        }

        if let Some(ref spec) = self.deselect {
            for index in resolve_columns(session, spec)? {
                session.deselect(index);
            }
        }

        Ok(())
    }
}

/// Resolve a comma-separated list of 1-based column numbers or header names
/// into 0-based column indexes
fn resolve_columns(session: &AnonymizationSession, spec: &str) -> Result<Vec<usize>, String> {
    let column_count = session.fields().len();
    let mut indexes = Vec::new();

    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let index = match token.parse::<usize>() {
            Ok(number) if (1..=column_count).contains(&number) => number - 1,
            Ok(number) => {
                return Err(format!(
                    "Column {number} is out of range (the sheet has {column_count} columns)"
                ))
            }
            Err(_) => session
                .column_index(token)
                .ok_or_else(|| format!("No column named '{token}'"))?,
        };
        indexes.push(index);
    }

    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::{AnonymizationConfig, CellValue, Sheet};

    fn session() -> AnonymizationSession {
        let engine = Arc::new(AnonymizationEngine::new(AnonymizationConfig::default()).unwrap());
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                vec![
                    CellValue::text("Employee Name"),
                    CellValue::text("Notes"),
                    CellValue::text("Salary"),
                ],
                vec![
                    CellValue::text("Jane Doe"),
                    CellValue::text("ok"),
                    CellValue::text("87000"),
                ],
            ],
        );
        AnonymizationSession::analyze(engine, "hr.csv", sheet, ActivityLog::default()).unwrap()
    }

    fn args(only: Option<&str>, select: Option<&str>, deselect: Option<&str>) -> AnonymizeArgs {
        AnonymizeArgs {
            input: PathBuf::from("hr.csv"),
            mode: None,
            select: select.map(String::from),
            deselect: deselect.map(String::from),
            only: only.map(String::from),
            output_dir: None,
        }
    }

    #[test]
    fn test_resolve_columns_by_number_and_name() {
        let session = session();
        assert_eq!(resolve_columns(&session, "1, notes").unwrap(), vec![0, 1]);
        assert_eq!(resolve_columns(&session, "").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_resolve_columns_rejects_unknown() {
        let session = session();
        assert!(resolve_columns(&session, "0").is_err());
        assert!(resolve_columns(&session, "4").is_err());
        assert!(resolve_columns(&session, "Bonus").is_err());
    }

    #[test]
    fn test_select_and_deselect() {
        let mut session = session();
        args(None, Some("Notes"), Some("3"))
            .apply_overrides(&mut session)
            .unwrap();

        assert!(session.selection().is_selected(0));
        assert!(session.selection().is_selected(1));
        assert!(!session.selection().is_selected(2));
    }

    #[test]
    fn test_only_replaces_suggestions() {
        let mut session = session();
        args(Some("2"), None, None)
            .apply_overrides(&mut session)
            .unwrap();

        assert_eq!(session.selection().selected_indexes(), vec![1]);
    }
}
