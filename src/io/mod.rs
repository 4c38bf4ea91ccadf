//! Spreadsheet input and output
//!
//! - [`source`]: file-name checks and the bounded async read
//! - [`SheetCodec`]: bytes to [`Sheet`] and back ([`CsvCodec`] is bundled)
//! - [`OutputNames`]: artifact naming derived from the source name

pub mod csv_codec;
pub mod names;
pub mod source;
pub mod traits;

pub use csv_codec::{CsvCodec, CSV_SHEET_NAME};
pub use names::OutputNames;
pub use source::{read_source_bytes, validate_file_name, InputLimits};
pub use traits::SheetCodec;

use crate::anonymization::{MappingLedger, Sheet};
use crate::domain::{InputError, Result, SheetmaskError};
use std::path::{Path, PathBuf};

/// A decoded source file
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// File name without directories
    pub file_name: String,
    /// First sheet of the file
    pub sheet: Sheet,
}

/// Files written for one run
#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    /// Anonymized sheet
    pub workbook: PathBuf,
    /// Mapping ledger, when it could be written
    pub ledger: Option<PathBuf>,
    /// Why the ledger could not be written
    pub ledger_error: Option<String>,
}

/// Codec able to parse `path`
///
/// # Errors
///
/// Returns [`InputError::Unparsable`] for accepted spreadsheet types that no
/// bundled codec reads.
pub fn codec_for(path: &Path) -> std::result::Result<Box<dyn SheetCodec>, InputError> {
    let extension = source::extension_of(path).unwrap_or_default();
    let codec = CsvCodec;
    if codec.extensions().contains(&extension.as_str()) {
        return Ok(Box::new(codec));
    }

    Err(InputError::Unparsable(format!(
        ".{extension} workbooks are not supported by the bundled reader; save the sheet as CSV"
    )))
}

/// Validate, read, and decode a source file
///
/// # Errors
///
/// Returns an input error if the name is rejected, the read fails or exceeds
/// its limits, or the content cannot be decoded.
pub async fn load_sheet(path: &Path, limits: &InputLimits) -> Result<LoadedSheet> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    validate_file_name(&file_name)?;
    let codec = codec_for(path)?;
    let bytes = read_source_bytes(path, limits).await?;
    let sheet = codec.decode(&bytes)?;

    tracing::info!(
        codec = codec.name(),
        rows = sheet.rows.len(),
        columns = sheet.column_count(),
        "Source sheet loaded"
    );

    Ok(LoadedSheet { file_name, sheet })
}

/// Write the anonymized sheet and the mapping ledger into `directory`
///
/// # Errors
///
/// Fails only when the anonymized sheet cannot be written. A ledger failure
/// is reported through [`WrittenOutputs::ledger_error`].
pub fn write_outputs(
    directory: &Path,
    names: &OutputNames,
    codec: &dyn SheetCodec,
    sheet: &Sheet,
    ledger: &MappingLedger,
) -> Result<WrittenOutputs> {
    std::fs::create_dir_all(directory).map_err(|e| {
        SheetmaskError::Output(format!(
            "Failed to create output directory {}: {e}",
            directory.display()
        ))
    })?;

    let workbook = directory.join(names.workbook_with_extension(codec.output_extension()));
    let bytes = codec.encode(sheet)?;
    std::fs::write(&workbook, bytes).map_err(|e| {
        SheetmaskError::Output(format!("Failed to write {}: {e}", workbook.display()))
    })?;

    let ledger_path = directory.join(&names.ledger);
    let (ledger, ledger_error) = match ledger.write_to(&ledger_path) {
        Ok(()) => (Some(ledger_path), None),
        Err(e) => {
            tracing::warn!(error = %e, "Mapping ledger not written");
            (None, Some(e.to_string()))
        }
    };

    Ok(WrittenOutputs {
        workbook,
        ledger,
        ledger_error,
    })
}
