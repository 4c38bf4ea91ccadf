//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Sheetmask configuration file.

use crate::anonymization::detector::CategoryRegistry;
use crate::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration file: {shown}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let registry = match config.anonymization.pattern_library {
            Some(ref path) => CategoryRegistry::from_file(path),
            None => CategoryRegistry::default_registry(),
        };
        let registry = match registry {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Pattern library could not be loaded");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Anonymization Mode: {}",
            config
                .anonymization
                .mode
                .map(|m| m.to_string())
                .unwrap_or_else(|| "(not set, pass --mode)".to_string())
        );
        println!(
            "  Pattern Library: {}",
            config
                .anonymization
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!("  Categories: {}", registry.entries().len());
        println!("  Max File Size: {} MB", config.input.max_file_size_mb);
        println!("  Read Timeout: {}s", config.input.read_timeout_secs);
        println!("  Output Directory: {}", config.output.directory.display());
        println!(
            "  Audit Log: {}",
            if config.anonymization.audit.enabled {
                config.anonymization.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args
            .execute(Some(Path::new("does-not-exist.toml")))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetmask.toml");
        std::fs::write(&path, "[anonymization]\nmode = \"range\"\n").unwrap();

        let args = ValidateArgs {};
        assert_eq!(args.execute(Some(&path)).await.unwrap(), 0);
    }
}
