//! Main anonymization engine
//!
//! [`AnonymizationEngine`] classifies header rows and walks a sheet applying
//! cell transforms to the selected columns, producing the anonymized sheet
//! (in place), the mapping ledger, and a run summary.
//!
//! # Examples
//!
//! ```no_run
//! use sheetmask::anonymization::{AnonymizationEngine, AnonymizationMode, config::AnonymizationConfig};
//! use sheetmask::anonymization::models::{FieldSelection, Sheet};
//! use sheetmask::logging::ActivityLog;
//!
//! # fn example(mut sheet: Sheet) -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let fields = engine.classify(&sheet.header());
//! let selection = FieldSelection::from_fields(&fields);
//!
//! let mut activity = ActivityLog::default();
//! let outcome = engine.anonymize_sheet(
//!     &mut sheet,
//!     &fields,
//!     &selection,
//!     AnonymizationMode::Contextual,
//!     &mut activity,
//! )?;
//! println!("{} cells anonymized", outcome.ledger.len());
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    anonymizer::{CellAnonymizer, ColumnContext, TokenVault},
    audit::{AuditLogger, MappingLedger},
    config::{AnonymizationConfig, AnonymizationMode},
    detector::{CategoryRegistry, FieldClassifier, ValuePatternMatcher},
    models::{CellValue, Category, Field, FieldSelection, MappingRecord, Sheet},
    report::RunSummary,
};
use crate::domain::{InputError, Result as DomainResult};
use crate::logging::ActivityLog;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

/// Result of one anonymization run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One record per substituted cell, row-major
    pub ledger: MappingLedger,
    /// Run statistics
    pub summary: RunSummary,
}

/// A selected column prepared for the walk
struct ColumnPlan {
    index: usize,
    header: String,
    category: Option<Category>,
}

/// Main anonymization engine
///
/// Holds the immutable pieces shared by every run: the category registry, the
/// value-shape detectors, and the optional audit logger. Token state is created
/// fresh for each call to [`anonymize_sheet`](Self::anonymize_sheet).
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    classifier: FieldClassifier,
    matcher: Arc<ValuePatternMatcher>,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// Loads the custom pattern library when one is configured, otherwise the
    /// built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Pattern library file cannot be loaded
    /// - Audit logger initialization fails
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let registry = if let Some(ref pattern_path) = config.pattern_library {
            CategoryRegistry::from_file(pattern_path)?
        } else {
            CategoryRegistry::default_registry()?
        };

        Self::with_registry(config, Arc::new(registry))
    }

    /// Create an engine over an already loaded registry
    pub fn with_registry(config: AnonymizationConfig, registry: Arc<CategoryRegistry>) -> Result<Self> {
        let matcher = ValuePatternMatcher::new().context("Failed to compile value detectors")?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::from_config(&config.audit)?)
        } else {
            None
        };

        Ok(Self {
            config,
            classifier: FieldClassifier::new(registry),
            matcher: Arc::new(matcher),
            audit_logger,
        })
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Category registry in use
    pub fn registry(&self) -> &CategoryRegistry {
        self.classifier.registry()
    }

    /// Classify a header row
    pub fn classify<S: AsRef<str>>(&self, header_row: &[S]) -> Vec<Field> {
        self.classifier.classify(header_row)
    }

    /// Anonymize the selected columns of `sheet` in place
    ///
    /// Rows after the header are walked in order. Cells beyond a short row's
    /// end and blank cells are left alone. A cell whose transform fails is
    /// logged with its position and left untouched; the run carries on.
    ///
    /// # Errors
    ///
    /// Returns an input error if the sheet has no header row.
    pub fn anonymize_sheet(
        &self,
        sheet: &mut Sheet,
        fields: &[Field],
        selection: &FieldSelection,
        mode: AnonymizationMode,
        activity: &mut ActivityLog,
    ) -> DomainResult<RunOutcome> {
        let start = Instant::now();
        let header = sheet.header();
        if header.is_empty() {
            return Err(InputError::EmptyHeaderRow.into());
        }

        let plans: Vec<ColumnPlan> = header
            .iter()
            .enumerate()
            .filter(|(index, _)| selection.is_selected(*index))
            .map(|(index, text)| ColumnPlan {
                index,
                header: text.clone(),
                category: fields
                    .iter()
                    .find(|f| f.index == index)
                    .and_then(Field::primary_category),
            })
            .collect();

        let anonymizer = CellAnonymizer::new(mode, Arc::clone(&self.matcher));
        let mut vault = TokenVault::new();
        let mut ledger = MappingLedger::new();
        let mut summary = RunSummary::new(mode);
        summary.columns_selected = plans.len();

        if plans.is_empty() {
            summary.add_warning("No columns selected; output is identical to input");
            activity.warning("No columns selected");
        }

        let sheet_name = sheet.name.clone();
        for (row_index, row) in sheet.rows.iter_mut().enumerate().skip(1) {
            summary.rows_processed += 1;

            for plan in &plans {
                let Some(cell) = row.get_mut(plan.index) else {
                    continue;
                };

                let column = ColumnContext {
                    index: plan.index,
                    header: &plan.header,
                    category: plan.category,
                };

                match anonymizer.transform(&mut vault, &column, cell) {
                    Ok(Some(transformed)) => {
                        ledger.record(MappingRecord {
                            sheet_name: sheet_name.clone(),
                            row: row_index + 1,
                            column_header: plan.header.clone(),
                            column_index: plan.index + 1,
                            original_value: cell.to_string(),
                            anonymized_value: transformed.value.clone(),
                            detection_method: transformed.method,
                        });
                        summary.record(transformed.method, plan.category);
                        *cell = CellValue::Text(transformed.value);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        summary.cells_skipped += 1;
                        activity.warning(format!(
                            "Error processing cell at row {}, column {}: {}",
                            row_index + 1,
                            plan.index + 1,
                            e
                        ));
                    }
                }
            }
        }

        tracing::info!(
            mode = %mode,
            rows = summary.rows_processed,
            columns = summary.columns_selected,
            substitutions = ledger.len(),
            skipped = summary.cells_skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Sheet anonymized"
        );

        Ok(RunOutcome { ledger, summary })
    }

    /// Append a hashed record of the run to the audit log, if enabled
    pub fn audit_run(&self, source: &str, outcome: &RunOutcome) -> Result<()> {
        match self.audit_logger {
            Some(ref logger) => logger.log_run(source, &outcome.summary, &outcome.ledger),
            None => Ok(()),
        }
    }
}
