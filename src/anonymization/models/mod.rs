//! Data models for the anonymization core

pub mod category;
pub mod field;
pub mod mapping;
pub mod sheet;

pub use category::{Category, UnknownCategory};
pub use field::{Field, FieldSelection, SelectionState, SuggestedAction};
pub use mapping::{DetectionMethod, MappingRecord};
pub use sheet::{CellValue, Sheet};
