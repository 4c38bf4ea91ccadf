//! Result type alias for Sheetmask
//!
//! This module provides a convenient Result type alias that uses SheetmaskError
//! as the error type.

use super::errors::SheetmaskError;

/// Result type alias for Sheetmask operations
///
/// # Examples
///
/// ```
/// use sheetmask::domain::result::Result;
/// use sheetmask::domain::errors::SheetmaskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SheetmaskError::Configuration("No anonymization mode selected".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SheetmaskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{InputError, SheetmaskError};

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(SheetmaskError::Output("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, InputError> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
