//! Domain types shared across Sheetmask.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`SheetmaskError`], [`InputError`], [`TransformError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the anonymization core return
//! [`Result<T, SheetmaskError>`]:
//!
//! ```rust
//! use sheetmask::domain::{InputError, Result};
//!
//! fn example(bytes: &[u8]) -> Result<()> {
//!     if bytes.is_empty() {
//!         return Err(InputError::EmptyFile.into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{InputError, SheetmaskError, TransformError};
pub use result::Result;
