//! Field-level de-identification of spreadsheet data
//!
//! The pipeline consists of:
//! - **Detection**: header classification against a synonym registry, plus
//!   value-shape detectors for unclassified columns
//! - **Anonymization**: per-category transforms in one of three modes, with
//!   deterministic per-run tokens
//! - **Audit**: the mapping ledger of every substitution and an optional
//!   hashed audit log
//!
//! # Usage
//!
//! ```rust,ignore
//! use sheetmask::anonymization::{AnonymizationEngine, AnonymizationSession, AnonymizationMode};
//!
//! let engine = Arc::new(AnonymizationEngine::new(config)?);
//! let mut session = AnonymizationSession::analyze(engine, "hr.csv", sheet, ActivityLog::default())?;
//! let output = session.run(AnonymizationMode::Contextual)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod report;
pub mod session;

// Re-export main types
pub use audit::MappingLedger;
pub use config::{AnonymizationConfig, AnonymizationMode};
pub use engine::{AnonymizationEngine, RunOutcome};
pub use models::{Category, CellValue, DetectionMethod, Field, FieldSelection, MappingRecord, Sheet};
pub use report::{AnalysisReport, RunSummary};
pub use session::{AnonymizationSession, SessionOutput};
