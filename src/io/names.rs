//! Output file naming

use serde::Serialize;

/// Base name used when nothing is left after stripping the extension
pub const FALLBACK_BASE_NAME: &str = "anonymized_data";

const SOURCE_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

/// Names of the two artifacts produced from one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputNames {
    /// Source name without its spreadsheet extension
    pub base: String,
    /// `<base>_anonymized.xlsx`
    pub workbook: String,
    /// `<base>_anonymization_map.csv`
    pub ledger: String,
}

impl OutputNames {
    /// Derive output names from the source file name
    ///
    /// A trailing `.xlsx`, `.xls`, or `.csv` (any case) is removed. Any other
    /// extension is kept as part of the base name.
    pub fn derive(source_name: &str) -> Self {
        let base = strip_source_extension(source_name);
        let base = if base.is_empty() {
            FALLBACK_BASE_NAME.to_string()
        } else {
            base.to_string()
        };

        Self {
            workbook: format!("{base}_anonymized.xlsx"),
            ledger: format!("{base}_anonymization_map.csv"),
            base,
        }
    }

    /// Anonymized workbook name for a writer that emits `extension`
    pub fn workbook_with_extension(&self, extension: &str) -> String {
        format!("{}_anonymized.{}", self.base, extension)
    }
}

fn strip_source_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    SOURCE_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("employees.xlsx", "employees" ; "xlsx")]
    #[test_case("Q3 Grants.XLS", "Q3 Grants" ; "uppercase xls")]
    #[test_case("payroll.csv", "payroll" ; "csv")]
    #[test_case("archive.xlsx.bak", "archive.xlsx.bak" ; "other extension kept")]
    #[test_case(".xlsx", "anonymized_data" ; "extension only")]
    #[test_case("", "anonymized_data" ; "empty")]
    fn test_base_name(source: &str, expected: &str) {
        assert_eq!(OutputNames::derive(source).base, expected);
    }

    #[test]
    fn test_derived_names() {
        let names = OutputNames::derive("employees.xlsx");
        assert_eq!(names.workbook, "employees_anonymized.xlsx");
        assert_eq!(names.ledger, "employees_anonymization_map.csv");
        assert_eq!(names.workbook_with_extension("csv"), "employees_anonymized.csv");
    }
}
