//! Spreadsheet codec abstraction
//!
//! The anonymization core works on an in-memory [`Sheet`]; a codec turns file
//! bytes into the first sheet of a workbook and back.

use crate::anonymization::models::Sheet;
use crate::domain::{InputError, Result};

/// Codec between file bytes and a [`Sheet`]
pub trait SheetCodec: Send + Sync {
    /// Short codec name for logs
    fn name(&self) -> &'static str;

    /// Lowercased file extensions this codec parses
    fn extensions(&self) -> &'static [&'static str];

    /// Extension of files this codec writes
    fn output_extension(&self) -> &'static str;

    /// Parse the first sheet
    ///
    /// # Errors
    ///
    /// Returns an input error when the bytes are not a readable sheet.
    fn decode(&self, bytes: &[u8]) -> std::result::Result<Sheet, InputError>;

    /// Serialize a sheet
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be serialized.
    fn encode(&self, sheet: &Sheet) -> Result<Vec<u8>>;
}
