//! One analyze → select → run workflow over a loaded sheet

use crate::anonymization::{
    audit::MappingLedger,
    config::AnonymizationMode,
    engine::AnonymizationEngine,
    models::{Field, FieldSelection, SelectionState, Sheet},
    report::{AnalysisReport, RunSummary},
};
use crate::domain::{InputError, Result};
use crate::logging::ActivityLog;
use std::sync::Arc;

/// Column count above which a slow-processing warning is raised
pub const WIDE_SHEET_COLUMNS: usize = 100;

/// Anonymized artifacts of one run
#[derive(Debug, Clone)]
pub struct SessionOutput {
    /// Anonymized copy of the sheet
    pub sheet: Sheet,
    /// Substitution ledger
    pub ledger: MappingLedger,
    /// Run statistics
    pub summary: RunSummary,
}

/// A loaded sheet, its classification, and the user's column selection
///
/// The source sheet is never modified: each run works on a copy with a fresh
/// token vault, so running twice yields identical output.
pub struct AnonymizationSession {
    engine: Arc<AnonymizationEngine>,
    source_name: String,
    sheet: Sheet,
    fields: Vec<Field>,
    selection: FieldSelection,
    warnings: Vec<String>,
    activity: ActivityLog,
}

impl AnonymizationSession {
    /// Classify a loaded sheet and seed the selection from the suggestions
    ///
    /// # Errors
    ///
    /// Returns an input error if the header row has no columns.
    pub fn analyze(
        engine: Arc<AnonymizationEngine>,
        source_name: impl Into<String>,
        sheet: Sheet,
        mut activity: ActivityLog,
    ) -> Result<Self> {
        let source_name = source_name.into();
        let header = sheet.header();
        if header.iter().all(|h| h.trim().is_empty()) {
            activity.error("No columns found in the spreadsheet header row");
            return Err(InputError::EmptyHeaderRow.into());
        }

        let mut warnings = Vec::new();
        if header.len() > WIDE_SHEET_COLUMNS {
            warnings.push(format!(
                "Large number of columns detected ({}). Processing may be slow.",
                header.len()
            ));
        }
        if sheet.data_row_count() == 0 {
            warnings.push("Only header row found".to_string());
        }
        for warning in &warnings {
            activity.warning(warning);
        }

        let fields = engine.classify(&header);
        let selection = FieldSelection::from_fields(&fields);

        activity.info(format!(
            "Analyzed {}: {} columns, {} flagged as sensitive",
            source_name,
            fields.len(),
            fields.iter().filter(|f| f.is_sensitive()).count()
        ));

        Ok(Self {
            engine,
            source_name,
            sheet,
            fields,
            selection,
            warnings,
            activity,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The unmodified source sheet
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Classified fields, one per non-blank header
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Include a column (0-based)
    pub fn select(&mut self, index: usize) {
        self.selection.set(index, true);
    }

    /// Exclude a column (0-based)
    pub fn deselect(&mut self, index: usize) {
        self.selection.set(index, false);
    }

    /// Flip a column's inclusion and return the new value
    pub fn toggle(&mut self, index: usize) -> bool {
        self.selection.toggle(index)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn clear_all(&mut self) {
        self.selection.clear_all();
    }

    /// Tri-state "select all" indicator
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// 0-based index of the column whose header is `name` (case-insensitive)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.sheet
            .header()
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }

    /// Non-fatal warnings raised while loading
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut ActivityLog {
        &mut self.activity
    }

    /// Analysis preview reflecting the current selection
    pub fn report(&self) -> AnalysisReport {
        let mut report = AnalysisReport::new(
            &self.source_name,
            &self.sheet.name,
            self.sheet.data_row_count(),
            &self.fields,
            &self.selection,
            self.engine.registry(),
        );
        for warning in &self.warnings {
            report.add_warning(warning);
        }
        report
    }

    /// Anonymize a copy of the sheet with `mode`
    pub fn run(&mut self, mode: AnonymizationMode) -> Result<SessionOutput> {
        self.activity.info(format!(
            "Starting {} anonymization of {} selected columns",
            mode,
            self.selection.selected_count()
        ));

        let mut sheet = self.sheet.clone();
        let outcome = self.engine.anonymize_sheet(
            &mut sheet,
            &self.fields,
            &self.selection,
            mode,
            &mut self.activity,
        )?;

        if let Err(e) = self.engine.audit_run(&self.source_name, &outcome) {
            self.activity.warning(format!("Audit log not written: {e}"));
        }

        let mut summary = outcome.summary;
        for warning in &self.warnings {
            summary.add_warning(warning);
        }

        self.activity.success(format!(
            "Anonymization complete: {} cells replaced, {} skipped",
            outcome.ledger.len(),
            summary.cells_skipped
        ));

        Ok(SessionOutput {
            sheet,
            ledger: outcome.ledger,
            summary,
        })
    }

    /// Restore the suggested selection and clear the activity log
    pub fn reset(&mut self) {
        self.selection = FieldSelection::from_fields(&self.fields);
        self.activity.clear();
    }
}
