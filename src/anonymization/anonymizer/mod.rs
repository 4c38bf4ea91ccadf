//! Cell transforms
//!
//! [`CellAnonymizer`] decides what happens to a single cell: the rule of the
//! column's primary category when there is one, otherwise a value-shape
//! detector, otherwise the generic fallback.

pub mod fallback;
pub mod masking;
pub mod rules;
pub mod tokenization;

pub use rules::{rule_for, NumericRule, TransformRule};
pub use tokenization::TokenVault;

use crate::anonymization::config::AnonymizationMode;
use crate::anonymization::detector::ValuePatternMatcher;
use crate::anonymization::models::{CellValue, Category, DetectionMethod};
use crate::domain::TransformError;
use std::sync::Arc;

/// Largest cell a spreadsheet can hold
pub const MAX_CELL_CHARS: usize = 32_767;

/// The column a cell belongs to
#[derive(Debug, Clone, Copy)]
pub struct ColumnContext<'a> {
    /// 0-based column index
    pub index: usize,
    /// Header text
    pub header: &'a str,
    /// Primary category of the column, if classified
    pub category: Option<Category>,
}

/// A cell replacement and how it was decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Replacement text
    pub value: String,
    /// Decision path
    pub method: DetectionMethod,
}

/// Applies one mode's transforms to individual cells
#[derive(Clone)]
pub struct CellAnonymizer {
    mode: AnonymizationMode,
    matcher: Arc<ValuePatternMatcher>,
}

impl CellAnonymizer {
    /// Create an anonymizer for a mode
    pub fn new(mode: AnonymizationMode, matcher: Arc<ValuePatternMatcher>) -> Self {
        Self { mode, matcher }
    }

    /// Mode in effect
    pub fn mode(&self) -> AnonymizationMode {
        self.mode
    }

    /// Transform one cell
    ///
    /// Returns `Ok(None)` for blank cells, which are never touched.
    pub fn transform(
        &self,
        vault: &mut TokenVault,
        column: &ColumnContext<'_>,
        cell: &CellValue,
    ) -> Result<Option<Transformed>, TransformError> {
        if cell.is_blank() {
            return Ok(None);
        }

        if let CellValue::Text(text) = cell {
            let len = text.chars().count();
            if len > MAX_CELL_CHARS {
                return Err(TransformError::CellTooLarge {
                    len,
                    max: MAX_CELL_CHARS,
                });
            }
        }

        if let Some(category) = column.category {
            let value = rule_for(category).apply(self.mode, column.index, cell, vault);
            return Ok(Some(Transformed {
                value,
                method: DetectionMethod::Header,
            }));
        }

        if let CellValue::Text(text) = cell {
            if let Some(kind) = self.matcher.detect(text, column.header) {
                let value = fallback::replace_detected(kind, column.index, text, vault);
                return Ok(Some(Transformed {
                    value,
                    method: DetectionMethod::Regex,
                }));
            }
        }

        let value = fallback::generic_replacement(self.mode, column.index, cell, vault);
        Ok(Some(Transformed {
            value,
            method: DetectionMethod::Generic,
        }))
    }
}
