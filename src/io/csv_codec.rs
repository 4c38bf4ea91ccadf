//! CSV sheet codec

use super::traits::SheetCodec;
use crate::anonymization::models::{CellValue, Sheet};
use crate::domain::{InputError, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

/// Sheet name reported for CSV input, which has no sheet names of its own
pub const CSV_SHEET_NAME: &str = "Sheet1";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads and writes single-sheet CSV files
///
/// Every cell is read as text; empty fields become blank cells. Rows keep
/// their own length, so ragged files round-trip unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl SheetCodec for CsvCodec {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn output_extension(&self) -> &'static str {
        "csv"
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<Sheet, InputError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                InputError::Unparsable(format!("CSV record {} is invalid: {}", index + 1, csv_reason(&e)))
            })?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::text(field)
                        }
                    })
                    .collect(),
            );
        }

        if rows.is_empty() {
            return Err(InputError::EmptyHeaderRow);
        }

        tracing::debug!(rows = rows.len(), "CSV decoded");
        Ok(Sheet::new(CSV_SHEET_NAME, rows))
    }

    fn encode(&self, sheet: &Sheet) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for row in &sheet.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }

        writer.into_inner().map_err(|e| {
            crate::domain::SheetmaskError::Output(format!("Failed to finish CSV output: {e}"))
        })
    }
}

/// Error description without any record content
fn csv_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Utf8 { pos, .. } => match pos {
            Some(pos) => format!("invalid UTF-8 at line {}", pos.line()),
            None => "invalid UTF-8".to_string(),
        },
        csv::ErrorKind::Io(e) => e.to_string(),
        _ => "malformed record".to_string(),
    }
}
