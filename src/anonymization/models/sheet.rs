//! In-memory sheet matrix

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value as handed over by the spreadsheet reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Blank cells are never transformed and never recorded
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the text of a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Format a number the way spreadsheet text export does: integers without a
/// fractional part, and never a negative zero.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

/// The first sheet of a workbook as a rectangular-ish matrix of cells
///
/// Row 0 is the header row. Data rows may be shorter than the header; missing
/// trailing cells are treated as blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as reported by the reader
    pub name: String,
    /// All rows, header first
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new sheet
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Header row rendered as text
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default()
    }

    /// Number of columns in the header row
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of data rows (excluding the header)
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Returns true if the sheet has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("").is_blank());
        assert!(!CellValue::text(" ").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(87000.0).to_string(), "87000");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Number(-0.0).to_string(), "0");
        assert_eq!(CellValue::Boolean(true).to_string(), "true");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-03-01");
    }

    #[test]
    fn test_sheet_shape() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                vec!["Name".into(), "Salary".into()],
                vec!["Jane".into(), CellValue::Number(1.0)],
            ],
        );
        assert_eq!(sheet.header(), vec!["Name", "Salary"]);
        assert_eq!(sheet.column_count(), 2);
        assert_eq!(sheet.data_row_count(), 1);
    }
}
