//! Anonymization configuration

use crate::domain::{Result as DomainResult, SheetmaskError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Anonymization strategy selected once per run
///
/// Governs which variant of each category's transform applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizationMode {
    /// Wipe values to placeholders or tokens
    Strict,
    /// Keep shape and magnitude (rounding, date shifting, 2-letter states)
    Contextual,
    /// Like contextual, but compensation is bucketed into labeled ranges
    Range,
}

impl AnonymizationMode {
    /// Identifier used in configuration and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Contextual => "contextual",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for AnonymizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnonymizationMode {
    type Err = SheetmaskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "strict_mode" | "strictmode" => Ok(Self::Strict),
            "contextual" | "contextual_mode" | "contextualmode" => Ok(Self::Contextual),
            "range" | "range_mode" | "rangemode" => Ok(Self::Range),
            _ => Err(SheetmaskError::Configuration(format!(
                "Invalid anonymization mode: {s}. Use 'strict', 'contextual' or 'range'"
            ))),
        }
    }
}

/// Anonymization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Mode for the run; required before any transform pass
    #[serde(default)]
    pub mode: Option<AnonymizationMode>,

    /// Path to a TOML header-synonym library replacing the built-in one
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Hashed audit log configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AnonymizationConfig {
    /// Configuration with a mode already selected
    pub fn with_mode(mode: AnonymizationMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    /// The selected mode, or a configuration error if none was selected
    pub fn require_mode(&self) -> DomainResult<AnonymizationMode> {
        self.mode.ok_or_else(|| {
            SheetmaskError::Configuration("No anonymization mode selected".to_string())
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }
}

/// Hashed audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the audit log
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines for audit entries
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("Audit log path must not be empty when audit logging is enabled");
        }
        Ok(())
    }
}
