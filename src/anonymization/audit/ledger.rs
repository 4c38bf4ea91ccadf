//! Mapping ledger: one row per substituted cell, rendered as CSV

use crate::anonymization::models::{DetectionMethod, MappingRecord};
use crate::domain::{Result, SheetmaskError};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use regex::Regex;
use std::path::Path;

/// `<script ...>...</script>` blocks, across line breaks
const SCRIPT_BLOCK_PATTERN: &str = r"(?is)<script\b[^>]*>.*?</script\b[^>]*>";

/// Any opening or closing script tag left after block removal
const SCRIPT_TAG_PATTERN: &str = r"(?i)</?script\b[^>]*>";

/// Ledger column headers, in order
pub const LEDGER_HEADER: [&str; 7] = [
    "SheetName",
    "Row",
    "ColumnHeader",
    "ColumnIndex",
    "OriginalValue",
    "AnonymizedValue",
    "DetectionMethod",
];

/// Ordered substitution records for one run
///
/// The ledger contains original values and is as sensitive as the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingLedger {
    records: Vec<MappingRecord>,
}

impl MappingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn record(&mut self, record: MappingRecord) {
        self.records.push(record);
    }

    /// Records in insertion (row-major) order
    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records decided by `method`
    pub fn count_by_method(&self, method: DetectionMethod) -> usize {
        self.records
            .iter()
            .filter(|r| r.detection_method == method)
            .count()
    }

    /// Render the ledger as CSV text
    ///
    /// Script blocks and stray script tags are removed from every field. A field is quoted only when
    /// it contains a comma, a double quote, or a line break; embedded quotes
    /// are doubled.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        let stripper = ScriptStripper::new()
            .map_err(|e| SheetmaskError::Other(format!("Invalid script pattern: {e}")))?;

        writer.write_record(LEDGER_HEADER)?;
        for record in &self.records {
            writer.write_record(record.to_row().iter().map(|field| stripper.strip(field)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SheetmaskError::Output(format!("Failed to finish mapping ledger: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| SheetmaskError::Output(format!("Mapping ledger is not UTF-8: {e}")))
    }

    /// Write the ledger CSV to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let csv = self.to_csv()?;
        std::fs::write(path, csv).map_err(|e| {
            SheetmaskError::Output(format!(
                "Failed to write mapping ledger {}: {e}",
                path.display()
            ))
        })
    }
}

/// Removes script markup from ledger fields, case-insensitively
pub struct ScriptStripper {
    blocks: Regex,
    tags: Regex,
}

impl ScriptStripper {
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            blocks: Regex::new(SCRIPT_BLOCK_PATTERN)?,
            tags: Regex::new(SCRIPT_TAG_PATTERN)?,
        })
    }

    /// Drop whole `<script>` blocks, then any unpaired opening or closing tag
    pub fn strip(&self, value: &str) -> String {
        let without_blocks = self.blocks.replace_all(value, "");
        self.tags.replace_all(&without_blocks, "").into_owned()
    }
}
