//! Domain error types
//!
//! This module defines the error hierarchy for Sheetmask. Errors are grouped the
//! way a run fails: input errors and configuration errors abort the run, cell
//! errors are isolated to a single cell, and output errors abort only when the
//! anonymized sheet itself cannot be produced.
//!
//! No error message in this module ever carries spreadsheet cell content.

use thiserror::Error;

/// Main Sheetmask error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum SheetmaskError {
    /// Input file errors (fatal to the current run)
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure to build or write an output artifact
    #[error("Output error: {0}")]
    Output(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl SheetmaskError {
    /// Process exit code for this error, as used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Input(_) => 3,
            _ => 5,
        }
    }
}

/// Input file errors
///
/// Raised while reading or parsing the source spreadsheet. Each of these aborts
/// the run; the user can retry with another file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The file has zero bytes
    #[error("File is empty")]
    EmptyFile,

    /// The file exceeds the configured size ceiling
    #[error("File too large: {size} bytes (maximum is {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    /// The bulk read did not finish within the allotted time
    #[error("File reading timed out after {0} seconds - file may be too large or corrupted")]
    ReadTimeout(u64),

    /// The bulk read was interrupted before completion
    #[error("File reading was aborted")]
    ReadAborted,

    /// The bulk read failed
    #[error("Failed to read file: {0}")]
    ReadFailed(String),

    /// The file name or extension is not acceptable
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// The workbook structure could not be read
    #[error("Invalid file format - could not read workbook structure: {0}")]
    Corrupt(String),

    /// The workbook contains no sheets
    #[error("No sheets found in the file")]
    NoSheets,

    /// The first row of the first sheet has no columns
    #[error("No columns found in the spreadsheet header row")]
    EmptyHeaderRow,

    /// The workbook bytes could not be parsed
    #[error("Failed to parse file: {0}")]
    Unparsable(String),
}

/// Cell-scoped transform errors
///
/// These never abort a run. The sheet walk logs them with the row and column
/// position and leaves the cell untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The cell text exceeds the spreadsheet cell limit
    #[error("Cell content exceeds {max} characters (found {len})")]
    CellTooLarge { len: usize, max: usize },
}

// Conversion from std::io::Error
impl From<std::io::Error> for SheetmaskError {
    fn from(err: std::io::Error) -> Self {
        SheetmaskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SheetmaskError {
    fn from(err: serde_json::Error) -> Self {
        SheetmaskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SheetmaskError {
    fn from(err: toml::de::Error) -> Self {
        SheetmaskError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for SheetmaskError {
    fn from(err: csv::Error) -> Self {
        SheetmaskError::Serialization(format!("CSV error: {err}"))
    }
}
