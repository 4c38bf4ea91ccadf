//! Audit records for individual cell substitutions

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a substitution was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// The column header matched a category
    Header,
    /// A value-shape detector fired on an unclassified column
    Regex,
    /// The user selected an unclassified column and the generic fallback applied
    Generic,
}

impl DetectionMethod {
    /// Identifier written to the mapping ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Regex => "regex",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One original-to-anonymized substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Sheet the cell belongs to
    pub sheet_name: String,
    /// 1-based row number (the header is row 1)
    pub row: usize,
    /// Column header text
    pub column_header: String,
    /// 1-based column number
    pub column_index: usize,
    /// Original value, stringified
    pub original_value: String,
    /// Replacement value, stringified
    pub anonymized_value: String,
    /// How the substitution was decided
    pub detection_method: DetectionMethod,
}

impl MappingRecord {
    /// Fields in ledger column order
    pub fn to_row(&self) -> [String; 7] {
        [
            self.sheet_name.clone(),
            self.row.to_string(),
            self.column_header.clone(),
            self.column_index.to_string(),
            self.original_value.clone(),
            self.anonymized_value.clone(),
            self.detection_method.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_row() {
        let record = MappingRecord {
            sheet_name: "Sheet1".to_string(),
            row: 2,
            column_header: "SSN".to_string(),
            column_index: 3,
            original_value: "123-45-6789".to_string(),
            anonymized_value: "***-**-6789".to_string(),
            detection_method: DetectionMethod::Header,
        };
        assert_eq!(
            record.to_row(),
            ["Sheet1", "2", "SSN", "3", "123-45-6789", "***-**-6789", "header"]
        );
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&DetectionMethod::Generic).unwrap();
        assert_eq!(json, "\"generic\"");
    }
}
