//! Bounded reading of the source file

use crate::config::InputConfig;
use crate::domain::InputError;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

/// Extensions accepted as spreadsheet input
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Characters never accepted in a source file name
const SUSPICIOUS_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Size and time limits for reading a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// Largest accepted file, in bytes
    pub max_file_size: u64,
    /// Time allowed for the whole read
    pub read_timeout: Duration,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl InputLimits {
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            read_timeout: config.read_timeout(),
        }
    }
}

/// Lowercased extension of `path`, if any
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Check a source file name before anything is read
///
/// # Errors
///
/// Rejects empty names, names with `<>:"|?*` or control characters, and
/// extensions other than `.xlsx`, `.xls`, `.csv`.
pub fn validate_file_name(name: &str) -> Result<(), InputError> {
    if name.trim().is_empty() {
        return Err(InputError::InvalidFileName("file name is empty".to_string()));
    }

    if name
        .chars()
        .any(|c| SUSPICIOUS_CHARS.contains(&c) || c.is_control())
    {
        return Err(InputError::InvalidFileName(
            "file name contains invalid characters".to_string(),
        ));
    }

    let supported = extension_of(Path::new(name))
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(InputError::InvalidFileName(format!(
            "unsupported file type, expected one of: .{}",
            SUPPORTED_EXTENSIONS.join(", .")
        )));
    }

    Ok(())
}

/// Read the whole file, enforcing the size ceiling and the read timeout
///
/// # Errors
///
/// - [`InputError::EmptyFile`] for zero-byte files
/// - [`InputError::FileTooLarge`] above the ceiling
/// - [`InputError::ReadTimeout`] when the read outlives the timeout
/// - [`InputError::ReadAborted`] when the read is interrupted
/// - [`InputError::ReadFailed`] for any other I/O failure
pub async fn read_source_bytes(path: &Path, limits: &InputLimits) -> Result<Vec<u8>, InputError> {
    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    check_size(metadata.len(), limits)?;

    let bytes = match tokio::time::timeout(limits.read_timeout, tokio::fs::read(path)).await {
        Ok(result) => result.map_err(read_error)?,
        Err(_) => {
            tracing::warn!(
                timeout_secs = limits.read_timeout.as_secs(),
                "Source file read timed out"
            );
            return Err(InputError::ReadTimeout(limits.read_timeout.as_secs()));
        }
    };

    // the file may have changed between the metadata call and the read
    check_size(bytes.len() as u64, limits)?;

    tracing::debug!(bytes = bytes.len(), "Source file read");
    Ok(bytes)
}

fn check_size(size: u64, limits: &InputLimits) -> Result<(), InputError> {
    if size == 0 {
        return Err(InputError::EmptyFile);
    }
    if size > limits.max_file_size {
        return Err(InputError::FileTooLarge {
            size,
            max: limits.max_file_size,
        });
    }
    Ok(())
}

fn read_error(err: std::io::Error) -> InputError {
    match err.kind() {
        ErrorKind::Interrupted => InputError::ReadAborted,
        _ => InputError::ReadFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("employees.xlsx" ; "xlsx")]
    #[test_case("Legacy.XLS" ; "uppercase xls")]
    #[test_case("export 2024.csv" ; "csv with space")]
    fn test_valid_file_names(name: &str) {
        assert!(validate_file_name(name).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("data<1>.csv" ; "angle brackets")]
    #[test_case("what?.xlsx" ; "question mark")]
    #[test_case("tab\there.csv" ; "control character")]
    #[test_case("notes.txt" ; "unsupported extension")]
    #[test_case("noextension" ; "no extension")]
    fn test_invalid_file_names(name: &str) {
        assert!(matches!(
            validate_file_name(name),
            Err(InputError::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_check_size() {
        let limits = InputLimits {
            max_file_size: 10,
            read_timeout: Duration::from_secs(1),
        };
        assert_eq!(check_size(0, &limits), Err(InputError::EmptyFile));
        assert_eq!(
            check_size(11, &limits),
            Err(InputError::FileTooLarge { size: 11, max: 10 })
        );
        assert!(check_size(10, &limits).is_ok());
    }

    #[test]
    fn test_default_limits() {
        let limits = InputLimits::default();
        assert_eq!(limits.max_file_size, 50 * 1024 * 1024);
        assert_eq!(limits.read_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_read_source_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Name\nJane\n").unwrap();

        let bytes = read_source_bytes(&path, &InputLimits::default()).await.unwrap();
        assert_eq!(bytes, b"Name\nJane\n");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_source_bytes(&dir.path().join("missing.csv"), &InputLimits::default()).await;
        assert!(matches!(result, Err(InputError::ReadFailed(_))));
    }
}
