//! Integration tests for source file limits and output writing

use sheetmask::anonymization::{CellValue, MappingLedger, Sheet};
use sheetmask::domain::{InputError, SheetmaskError};
use sheetmask::io::{load_sheet, write_outputs, CsvCodec, InputLimits, OutputNames};
use std::path::Path;
use std::time::Duration;

fn limits(max_file_size: u64) -> InputLimits {
    InputLimits {
        max_file_size,
        read_timeout: Duration::from_secs(5),
    }
}

fn input_error(result: Result<impl Sized, SheetmaskError>) -> InputError {
    match result {
        Err(SheetmaskError::Input(e)) => e,
        Err(other) => panic!("expected an input error, got {other}"),
        Ok(_) => panic!("expected an input error"),
    }
}

#[tokio::test]
async fn test_file_above_ceiling_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.csv");
    std::fs::write(&path, "Employee Name\nJane Doe\n").unwrap();

    let err = input_error(load_sheet(&path, &limits(8)).await);
    assert_eq!(err, InputError::FileTooLarge { size: 23, max: 8 });
}

#[tokio::test]
async fn test_file_at_ceiling_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exact.csv");
    std::fs::write(&path, "Employee Name\nJane Doe\n").unwrap();

    let loaded = load_sheet(&path, &limits(23)).await.unwrap();
    assert_eq!(loaded.sheet.data_row_count(), 1);
}

#[tokio::test]
async fn test_empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let err = input_error(load_sheet(&path, &InputLimits::default()).await);
    assert_eq!(err, InputError::EmptyFile);
}

#[tokio::test]
async fn test_unsupported_names_are_rejected_before_reading() {
    let err = input_error(load_sheet(Path::new("/nonexistent/notes.txt"), &InputLimits::default()).await);
    assert!(matches!(err, InputError::InvalidFileName(_)));

    let err = input_error(load_sheet(Path::new("/nonexistent/a|b.csv"), &InputLimits::default()).await);
    assert!(matches!(err, InputError::InvalidFileName(_)));
}

#[tokio::test]
async fn test_workbook_formats_report_unparsable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.xlsx");
    std::fs::write(&path, b"PK\x03\x04").unwrap();

    let err = input_error(load_sheet(&path, &InputLimits::default()).await);
    assert!(matches!(err, InputError::Unparsable(_)));
}

#[tokio::test]
async fn test_error_messages_do_not_echo_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    let mut bytes = b"Employee Name\nJane Doe 123-45-6789 ".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    std::fs::write(&path, bytes).unwrap();

    let err = input_error(load_sheet(&path, &InputLimits::default()).await);
    let message = err.to_string();
    assert!(!message.contains("Jane"));
    assert!(!message.contains("6789"));
}

#[test]
fn test_ledger_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = Sheet::new("Sheet1", vec![vec![CellValue::text("Employee Name")]]);
    let names = OutputNames::derive("hr.csv");

    // a directory where the ledger file should go makes the ledger write fail
    std::fs::create_dir(dir.path().join(&names.ledger)).unwrap();

    let written = write_outputs(dir.path(), &names, &CsvCodec, &sheet, &MappingLedger::new()).unwrap();

    assert!(written.workbook.exists());
    assert!(written.ledger.is_none());
    assert!(written.ledger_error.is_some());
}

#[test]
fn test_output_names_fall_back_for_bare_extension() {
    let names = OutputNames::derive(".xlsx");
    assert_eq!(names.workbook, "anonymized_data_anonymized.xlsx");
    assert_eq!(names.ledger, "anonymized_data_anonymization_map.csv");
}
