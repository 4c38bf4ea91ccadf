//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub path: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(path = %self.path.display(), "Initializing configuration file");

        println!("📝 Initializing Sheetmask configuration");
        println!();

        if self.path.exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.path.display());
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.path, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.path.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and pick an anonymization mode", self.path.display());
                println!("  2. Validate configuration: sheetmask validate-config");
                println!("  3. Review the suggested columns: sheetmask analyze <file.csv>");
                println!("  4. Anonymize: sheetmask anonymize <file.csv>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration with every option and its default
    fn generate_config() -> String {
        r#"# Sheetmask Configuration File
# Field-level de-identification for HR and equity spreadsheets
#
# Every value below is the default. ${VAR} references are replaced with
# environment variables, and SHEETMASK_<SECTION>_<KEY> variables override
# individual keys (for example SHEETMASK_ANONYMIZATION_MODE=strict).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Anonymization
# ============================================================================
[anonymization]
# Mode applied by `sheetmask anonymize` when --mode is not given
# - strict:     tokens, fixed masks and placeholders; no real values survive
# - contextual: tokens plus shifted dates and rounded amounts
# - range:      like contextual, with compensation shown as salary bands
# mode = "contextual"

# Custom header synonym library (defaults to the built-in one)
# pattern_library = "./patterns/header_synonyms.toml"

[anonymization.audit]
# Append one entry per run; replacement pairs are stored as SHA-256 hashes
enabled = false
log_path = "./audit/anonymization.log"
json_format = true

# ============================================================================
# Input Limits
# ============================================================================
[input]
# Largest accepted file, in megabytes
max_file_size_mb = 50

# Time allowed for reading the file, in seconds
read_timeout_secs = 30

# ============================================================================
# Output
# ============================================================================
[output]
# Directory for <name>_anonymized.* and <name>_anonymization_map.csv
directory = "."

# ============================================================================
# Logging
# ============================================================================
[logging]
# Rotating JSON log file in addition to console output
local_enabled = false
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"

# Entries kept in the in-memory activity log
activity_log_capacity = 100
"#
        .to_string()
    }
}
