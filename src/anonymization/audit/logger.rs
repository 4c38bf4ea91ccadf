//! Audit logger for anonymization runs
//!
//! Unlike the mapping ledger, the audit log never holds original values: each
//! one is replaced by its SHA-256 digest.

use crate::anonymization::audit::MappingLedger;
use crate::anonymization::config::AuditConfig;
use crate::anonymization::models::MappingRecord;
use crate::anonymization::report::RunSummary;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    source: String,
    mode: String,
    rows_processed: usize,
    substitutions: usize,
    cells_skipped: usize,
    substitutions_hashed: Vec<AuditSubstitution>,
}

/// Audit substitution entry (with hashed original value)
#[derive(Debug, Serialize)]
struct AuditSubstitution {
    row: usize,
    column_index: usize,
    column_header: String,
    detection_method: String,
    /// SHA-256 hash of original value (never log plaintext values)
    value_hash: String,
}

/// Audit logger for anonymization runs
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Create an audit logger from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log a completed run
    pub fn log_run(&self, source: &str, summary: &RunSummary, ledger: &MappingLedger) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            source: source.to_string(),
            mode: summary
                .mode
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unset".to_string()),
            rows_processed: summary.rows_processed,
            substitutions: ledger.len(),
            cells_skipped: summary.cells_skipped,
            substitutions_hashed: ledger
                .records()
                .iter()
                .map(|r| self.create_audit_substitution(r))
                .collect(),
        };

        self.write_entry(&entry)
    }

    fn create_audit_substitution(&self, record: &MappingRecord) -> AuditSubstitution {
        AuditSubstitution {
            row: record.row,
            column_index: record.column_index,
            column_header: record.column_header.clone(),
            detection_method: record.detection_method.to_string(),
            value_hash: self.hash_value(&record.original_value),
        }
    }

    /// Hash a value using SHA-256
    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            writeln!(
                file,
                "[{}] Source: {} | Mode: {} | Rows: {} | Substitutions: {} | Skipped: {}",
                entry.timestamp,
                entry.source,
                entry.mode,
                entry.rows_processed,
                entry.substitutions,
                entry.cells_skipped
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}
