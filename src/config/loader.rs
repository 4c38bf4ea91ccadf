//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SheetmaskConfig;
use crate::domain::errors::SheetmaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "sheetmask.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SheetmaskConfig
/// 4. Applies environment variable overrides (SHEETMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use sheetmask::config::loader::load_config;
///
/// let config = load_config("sheetmask.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SheetmaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetmaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SheetmaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SheetmaskConfig = toml::from_str(&contents)
        .map_err(|e| SheetmaskError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration, falling back to defaults when no file exists
///
/// An explicitly given path must exist. Without one, `sheetmask.toml` in the
/// working directory is used when present; otherwise defaults apply (with no
/// anonymization mode selected). Environment overrides apply in every case.
pub fn load_config_or_default(path: Option<&Path>) -> Result<SheetmaskConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No configuration file found, using defaults");
    let mut config = SheetmaskConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut SheetmaskConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        SheetmaskError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SheetmaskError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SheetmaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SHEETMASK_* prefix
///
/// Environment variables follow the pattern: SHEETMASK_<SECTION>_<KEY>
/// For example: SHEETMASK_ANONYMIZATION_MODE, SHEETMASK_OUTPUT_DIRECTORY
fn apply_env_overrides(config: &mut SheetmaskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SHEETMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    if let Ok(val) = std::env::var("SHEETMASK_ANONYMIZATION_MODE") {
        config.anonymization.mode = Some(val.parse()?);
    }
    if let Ok(val) = std::env::var("SHEETMASK_ANONYMIZATION_PATTERN_LIBRARY") {
        config.anonymization.pattern_library = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("SHEETMASK_ANONYMIZATION_AUDIT_ENABLED") {
        config.anonymization.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHEETMASK_ANONYMIZATION_AUDIT_LOG_PATH") {
        config.anonymization.audit.log_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("SHEETMASK_ANONYMIZATION_AUDIT_JSON_FORMAT") {
        config.anonymization.audit.json_format = val.parse().unwrap_or(true);
    }

    // Input overrides
    if let Ok(val) = std::env::var("SHEETMASK_INPUT_MAX_FILE_SIZE_MB") {
        if let Ok(size) = val.parse() {
            config.input.max_file_size_mb = size;
        }
    }
    if let Ok(val) = std::env::var("SHEETMASK_INPUT_READ_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.input.read_timeout_secs = secs;
        }
    }

    // Output overrides
    if let Ok(val) = std::env::var("SHEETMASK_OUTPUT_DIRECTORY") {
        config.output.directory = PathBuf::from(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SHEETMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHEETMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SHEETMASK_TEST_SUBST_VAR", "test_value");
        let input = "directory = \"${SHEETMASK_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "directory = \"test_value\"\n");
        std::env::remove_var("SHEETMASK_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SHEETMASK_TEST_MISSING_VAR");
        let input = "directory = \"${SHEETMASK_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitution_skips_comments() {
        std::env::remove_var("SHEETMASK_TEST_COMMENTED_VAR");
        let input = "# directory = \"${SHEETMASK_TEST_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(SheetmaskError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[input]
max_file_size_mb = 10

[output]
directory = "./out"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.input.max_file_size_mb, 10);
        assert_eq!(config.input.read_timeout_secs, 30);
        assert_eq!(config.output.directory, PathBuf::from("./out"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[input\nmax_file_size_mb = ").unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
