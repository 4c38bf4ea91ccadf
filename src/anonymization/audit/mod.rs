//! Audit trail for anonymization runs
//!
//! - [`MappingLedger`]: plaintext original-to-anonymized mapping, one row per cell
//! - [`AuditLogger`]: optional run log with hashed original values

pub mod ledger;
pub mod logger;

pub use ledger::{MappingLedger, LEDGER_HEADER};
pub use logger::AuditLogger;
