//! Sensitive-field detection
//!
//! Two detection passes feed the engine:
//! - header classification against the category registry ([`FieldClassifier`])
//! - value-shape detection for unclassified columns ([`ValuePatternMatcher`])

pub mod classifier;
pub mod header;
pub mod patterns;
pub mod regex;

pub use classifier::FieldClassifier;
pub use header::{normalize_header, HeaderExclusion, HeaderPattern};
pub use patterns::{CategoryEntry, CategoryRegistry, SuppressionRule};
pub use regex::{ValueKind, ValuePatternMatcher};
