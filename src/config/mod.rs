//! Configuration management for Sheetmask.
//!
//! Sheetmask uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHEETMASK_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetmask::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sheetmask.toml")?;
//! println!("Output directory: {}", config.output.directory.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! mode = "contextual"
//!
//! [input]
//! max_file_size_mb = 50
//! read_timeout_secs = 30
//!
//! [output]
//! directory = "${HOME}/anonymized"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, InputConfig, LoggingConfig, OutputConfig, SheetmaskConfig};
