//! Field analysis results and user selections

use super::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suggested handling for a field, derived from its detected categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// At least one sensitivity category was detected
    Anonymize,
    /// Nothing was detected
    Keep,
}

/// One named column of the input sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// 0-based column position
    pub index: usize,
    /// Raw header text
    pub name: String,
    /// Detected categories after suppression, in display-priority order
    pub detected_types: Vec<Category>,
    /// Derived suggestion
    pub suggested_action: SuggestedAction,
}

impl Field {
    /// Create a field from its detected categories
    ///
    /// `detected_types` is expected to be deduplicated and already ordered for
    /// display.
    pub fn new(index: usize, name: impl Into<String>, detected_types: Vec<Category>) -> Self {
        let suggested_action = if detected_types.is_empty() {
            SuggestedAction::Keep
        } else {
            SuggestedAction::Anonymize
        };
        Self {
            index,
            name: name.into(),
            detected_types,
            suggested_action,
        }
    }

    /// Returns true if any category was detected
    pub fn is_sensitive(&self) -> bool {
        !self.detected_types.is_empty()
    }

    /// Category whose transform applies to this field's cells
    pub fn primary_category(&self) -> Option<Category> {
        self.detected_types
            .iter()
            .copied()
            .min_by_key(Category::dispatch_rank)
    }

    /// Returns true if the field carries the given category
    pub fn has(&self, category: Category) -> bool {
        self.detected_types.contains(&category)
    }
}

/// Tri-state summary of a selection, as shown by a "select all" control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Every field is selected
    All,
    /// No field is selected
    None,
    /// Some fields are selected
    Partial,
}

/// Which columns take part in the anonymization pass
///
/// Seeded from each field's suggested action and editable before the run.
/// Columns that never produced a [`Field`] (blank headers) may still be
/// selected explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    selections: BTreeMap<usize, bool>,
}

impl FieldSelection {
    /// Seed a selection from classified fields
    pub fn from_fields(fields: &[Field]) -> Self {
        let selections = fields
            .iter()
            .map(|f| (f.index, f.suggested_action == SuggestedAction::Anonymize))
            .collect();
        Self { selections }
    }

    /// Returns true if the column is included in the pass
    pub fn is_selected(&self, index: usize) -> bool {
        self.selections.get(&index).copied().unwrap_or(false)
    }

    /// Include or exclude a column
    pub fn set(&mut self, index: usize, selected: bool) {
        self.selections.insert(index, selected);
    }

    /// Flip a column's inclusion and return the new value
    pub fn toggle(&mut self, index: usize) -> bool {
        let entry = self.selections.entry(index).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Include every known column
    pub fn select_all(&mut self) {
        self.selections.values_mut().for_each(|v| *v = true);
    }

    /// Exclude every known column
    pub fn clear_all(&mut self) {
        self.selections.values_mut().for_each(|v| *v = false);
    }

    /// Indexes of the included columns, ascending
    pub fn selected_indexes(&self) -> Vec<usize> {
        self.selections
            .iter()
            .filter_map(|(idx, selected)| selected.then_some(*idx))
            .collect()
    }

    /// Number of included columns
    pub fn selected_count(&self) -> usize {
        self.selections.values().filter(|v| **v).count()
    }

    /// Tri-state summary over the known columns
    pub fn state(&self) -> SelectionState {
        let selected = self.selected_count();
        if selected == 0 {
            SelectionState::None
        } else if selected == self.selections.len() {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<Field> {
        vec![
            Field::new(0, "Employee Name", vec![Category::Name]),
            Field::new(1, "Notes", vec![]),
            Field::new(3, "SSN", vec![Category::Ssn]),
        ]
    }

    #[test]
    fn test_suggested_action() {
        let f = fields();
        assert_eq!(f[0].suggested_action, SuggestedAction::Anonymize);
        assert_eq!(f[1].suggested_action, SuggestedAction::Keep);
    }

    #[test]
    fn test_primary_category_uses_dispatch_order() {
        let field = Field::new(0, "x", vec![Category::TaxValue, Category::Compensation]);
        assert_eq!(field.primary_category(), Some(Category::Compensation));
        assert_eq!(Field::new(1, "y", vec![]).primary_category(), None);
    }

    #[test]
    fn test_selection_seeded_from_suggestions() {
        let selection = FieldSelection::from_fields(&fields());
        assert!(selection.is_selected(0));
        assert!(!selection.is_selected(1));
        assert!(!selection.is_selected(2));
        assert!(selection.is_selected(3));
        assert_eq!(selection.state(), SelectionState::Partial);
    }

    #[test]
    fn test_selection_edits() {
        let mut selection = FieldSelection::from_fields(&fields());
        assert!(selection.toggle(1));
        assert_eq!(selection.state(), SelectionState::All);

        selection.clear_all();
        assert_eq!(selection.state(), SelectionState::None);

        selection.set(2, true);
        assert_eq!(selection.selected_indexes(), vec![2]);

        selection.select_all();
        assert_eq!(selection.selected_indexes(), vec![0, 1, 2, 3]);
    }
}
