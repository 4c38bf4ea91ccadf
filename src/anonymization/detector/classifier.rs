//! Header-row classification

use crate::anonymization::detector::header::normalize_header;
use crate::anonymization::detector::patterns::CategoryRegistry;
use crate::anonymization::models::{Category, Field};
use std::sync::Arc;

/// Classifies every column of a header row against the category registry
///
/// Classification is a pure function of the header row: the same row always
/// yields the same fields.
#[derive(Clone)]
pub struct FieldClassifier {
    registry: Arc<CategoryRegistry>,
}

impl FieldClassifier {
    /// Create a classifier over a registry
    pub fn new(registry: Arc<CategoryRegistry>) -> Self {
        Self { registry }
    }

    /// Registry used by this classifier
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Classify a header row
    ///
    /// Blank headers produce no field. Every other header produces exactly one
    /// field, possibly with no detected categories.
    pub fn classify<S: AsRef<str>>(&self, header_row: &[S]) -> Vec<Field> {
        let fields: Vec<Field> = header_row
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.as_ref().trim().is_empty())
            .map(|(index, header)| {
                Field::new(index, header.as_ref(), self.detect(header.as_ref()))
            })
            .collect();

        tracing::debug!(
            columns = header_row.len(),
            fields = fields.len(),
            sensitive = fields.iter().filter(|f| f.is_sensitive()).count(),
            "Header row classified"
        );

        fields
    }

    /// Categories detected for a single header, after suppression, in display order
    pub fn detect(&self, header: &str) -> Vec<Category> {
        let normalized = normalize_header(header);

        let mut detected: Vec<Category> = self
            .registry
            .entries()
            .iter()
            .filter(|entry| entry.matches_normalized(&normalized))
            .map(|entry| entry.category)
            .collect();

        self.registry.apply_suppressions(&mut detected);
        self.registry.sort_for_display(&mut detected);
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::SuggestedAction;
    use test_case::test_case;

    fn classifier() -> FieldClassifier {
        FieldClassifier::new(Arc::new(CategoryRegistry::default_registry().unwrap()))
    }

    #[test_case("Employee Name", &[Category::Name] ; "employee name")]
    #[test_case("SSN", &[Category::Ssn] ; "ssn")]
    #[test_case("Salary", &[Category::Compensation] ; "salary")]
    #[test_case("State Withholding", &[Category::TaxValue] ; "state withholding is tax")]
    #[test_case("State", &[Category::State] ; "state is geography")]
    #[test_case("Employee ID", &[Category::EmpId] ; "empid suppresses name")]
    #[test_case("SS", &[Category::TaxValue] ; "exact short synonym")]
    #[test_case("Social Security Number", &[Category::Ssn] ; "ssn suppresses tax value")]
    #[test_case("Fair Market Value", &[Category::Fmv] ; "fmv suppresses compensation")]
    #[test_case("Grant Date", &[Category::GrantDate] ; "grant date")]
    #[test_case("Work Email", &[Category::Email] ; "work email")]
    #[test_case("Notes", &[] ; "unclassified")]
    fn test_detect(header: &str, expected: &[Category]) {
        assert_eq!(classifier().detect(header), expected);
    }

    #[test]
    fn test_multiple_categories_in_display_order() {
        let detected = classifier().detect("Tax Withholding Amount");
        assert_eq!(detected, vec![Category::Compensation, Category::TaxValue]);
    }

    #[test]
    fn test_blank_headers_are_skipped() {
        let fields = classifier().classify(&["Employee Name", "", "  ", "Notes"]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].index, 0);
        assert_eq!(fields[1].index, 3);
        assert_eq!(fields[1].suggested_action, SuggestedAction::Keep);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let header = ["Employee Name", "SSN", "Salary", "State", "Notes", "Grant ID"];
        let c = classifier();
        assert_eq!(c.classify(&header), c.classify(&header));
    }
}
