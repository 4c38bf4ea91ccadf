//! Console reports for the analysis preview and completed runs

use crate::anonymization::config::AnonymizationMode;
use crate::anonymization::detector::CategoryRegistry;
use crate::anonymization::models::{Category, DetectionMethod, Field, FieldSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const RULE: &str = "───────────────────────────────────────────────────────────────\n";
const BANNER: &str = "═══════════════════════════════════════════════════════════════\n";

/// One analyzed column as shown in the preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReport {
    /// 1-based column number
    pub column: usize,
    /// Header text
    pub header: String,
    /// Friendly names of the detected categories, in display order
    pub labels: Vec<String>,
    /// Whether the column is currently selected
    pub selected: bool,
}

/// Analysis preview for a loaded sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source file name
    pub source: String,
    /// Sheet name
    pub sheet_name: String,
    /// Data rows below the header
    pub data_rows: usize,
    /// Analyzed columns
    pub fields: Vec<FieldReport>,
    /// Non-fatal input warnings
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Build the preview from classified fields and the current selection
    pub fn new(
        source: impl Into<String>,
        sheet_name: impl Into<String>,
        data_rows: usize,
        fields: &[Field],
        selection: &FieldSelection,
        registry: &CategoryRegistry,
    ) -> Self {
        let fields = fields
            .iter()
            .map(|field| FieldReport {
                column: field.index + 1,
                header: field.name.clone(),
                labels: registry.friendly_labels(&field.detected_types),
                selected: selection.is_selected(field.index),
            })
            .collect();

        Self {
            source: source.into(),
            sheet_name: sheet_name.into(),
            data_rows,
            fields,
            warnings: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Columns with at least one detected category
    pub fn sensitive_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.labels.is_empty()).count()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("                   SPREADSHEET ANALYSIS                        \n");
        output.push_str(BANNER);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(RULE);
        output.push_str(&format!("  File:                {}\n", self.source));
        output.push_str(&format!("  Sheet:               {}\n", self.sheet_name));
        output.push_str(&format!("  Data Rows:           {}\n", self.data_rows));
        output.push_str(&format!("  Columns:             {}\n", self.fields.len()));
        output.push_str(&format!("  Sensitive Columns:   {}\n", self.sensitive_count()));
        output.push('\n');

        if !self.fields.is_empty() {
            output.push_str("🔍 FIELDS\n");
            output.push_str(RULE);
            for field in &self.fields {
                let mark = if field.selected { "[x]" } else { "[ ]" };
                let labels = if field.labels.is_empty() {
                    "-".to_string()
                } else {
                    field.labels.join(", ")
                };
                output.push_str(&format!(
                    "  {mark} {:>3}  {:28} {}\n",
                    field.column, field.header, labels
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(RULE);
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str(BANNER);
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Statistics of a completed anonymization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Mode the run used
    pub mode: Option<AnonymizationMode>,
    /// Data rows walked
    pub rows_processed: usize,
    /// Columns included in the pass
    pub columns_selected: usize,
    /// Cells replaced by a category rule
    pub header_substitutions: usize,
    /// Cells replaced after a value-shape detector fired
    pub regex_substitutions: usize,
    /// Cells replaced by the generic fallback
    pub generic_substitutions: usize,
    /// Header-rule substitutions per category
    pub by_category: BTreeMap<Category, usize>,
    /// Cells left untouched because their transform failed
    pub cells_skipped: usize,
    /// Non-fatal warnings raised during the run
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn new(mode: AnonymizationMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    /// Count one substitution
    pub fn record(&mut self, method: DetectionMethod, category: Option<Category>) {
        match method {
            DetectionMethod::Header => self.header_substitutions += 1,
            DetectionMethod::Regex => self.regex_substitutions += 1,
            DetectionMethod::Generic => self.generic_substitutions += 1,
        }
        if let Some(category) = category {
            *self.by_category.entry(category).or_insert(0) += 1;
        }
    }

    /// All substitutions
    pub fn total_substitutions(&self) -> usize {
        self.header_substitutions + self.regex_substitutions + self.generic_substitutions
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Format summary for console output
    pub fn format_console(&self, registry: &CategoryRegistry) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("                  ANONYMIZATION SUMMARY                        \n");
        output.push_str(BANNER);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(RULE);
        if let Some(mode) = self.mode {
            output.push_str(&format!("  Mode:                  {mode}\n"));
        }
        output.push_str(&format!("  Rows Processed:        {}\n", self.rows_processed));
        output.push_str(&format!("  Columns Selected:      {}\n", self.columns_selected));
        output.push_str(&format!("  Cells Anonymized:      {}\n", self.total_substitutions()));
        output.push_str(&format!("    by header:           {}\n", self.header_substitutions));
        output.push_str(&format!("    by value pattern:    {}\n", self.regex_substitutions));
        output.push_str(&format!("    by generic rule:     {}\n", self.generic_substitutions));
        output.push_str(&format!("  Cells Skipped:         {}\n", self.cells_skipped));
        output.push('\n');

        if !self.by_category.is_empty() {
            output.push_str("🔍 SUBSTITUTIONS BY CATEGORY\n");
            output.push_str(RULE);

            let mut categories: Vec<_> = self.by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in categories {
                output.push_str(&format!(
                    "  {:30} {:>5}\n",
                    registry.display_name(*category),
                    count
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(RULE);
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str(BANNER);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CategoryRegistry {
        CategoryRegistry::default_registry().unwrap()
    }

    #[test]
    fn test_analysis_report() {
        let fields = vec![
            Field::new(0, "Employee Name", vec![Category::Name]),
            Field::new(2, "Notes", vec![]),
        ];
        let selection = FieldSelection::from_fields(&fields);

        let mut report = AnalysisReport::new("hr.csv", "Sheet1", 4, &fields, &selection, &registry());
        report.add_warning("Only header row found");

        assert_eq!(report.sensitive_count(), 1);
        assert_eq!(report.fields[1].column, 3);
        assert!(report.fields[0].selected);
        assert!(!report.fields[1].selected);

        let output = report.format_console();
        assert!(output.contains("SPREADSHEET ANALYSIS"));
        assert!(output.contains("Data Rows:           4"));
        assert!(output.contains("[x]"));
        assert!(output.contains("Only header row found"));
    }

    #[test]
    fn test_run_summary_counts() {
        let mut summary = RunSummary::new(AnonymizationMode::Range);
        summary.record(DetectionMethod::Header, Some(Category::Compensation));
        summary.record(DetectionMethod::Header, Some(Category::Compensation));
        summary.record(DetectionMethod::Regex, None);
        summary.record(DetectionMethod::Generic, None);

        assert_eq!(summary.total_substitutions(), 4);
        assert_eq!(summary.by_category.get(&Category::Compensation), Some(&2));

        let output = summary.format_console(&registry());
        assert!(output.contains("Mode:                  range"));
        assert!(output.contains("Cells Anonymized:      4"));
    }
}
