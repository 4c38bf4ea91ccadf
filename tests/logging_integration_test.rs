//! Integration tests for logging and the activity log

use sheetmask::config::LoggingConfig;
use sheetmask::domain::SheetmaskError;
use sheetmask::logging::{init_logging, sanitize_message, ActivityLevel, ActivityLog};
use sheetmask::{log_error_with_context, log_run_complete, log_run_start};
use std::time::Duration;

// The global subscriber can only be installed once per process, so this is
// the only test in this file that calls init_logging.
#[test]
fn test_init_logging_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_dir.to_string_lossy().into_owned(),
        local_rotation: "never".to_string(),
        ..LoggingConfig::default()
    };

    let guard = init_logging("info", &config).unwrap();
    log_run_start!("employees.csv", "contextual");
    log_run_complete!(3, Duration::from_millis(12));
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(entries.iter().any(|name| name.starts_with("sheetmask.log")));

    // a second global subscriber is rejected
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}

#[test]
fn test_invalid_log_level_is_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(matches!(result, Err(SheetmaskError::Configuration(_))));
}

#[test]
fn test_activity_log_keeps_most_recent_entries() {
    let mut log = ActivityLog::new(3);
    for i in 0..5 {
        log.info(format!("step {i}"));
    }
    log.error("failed <b>badly</b>");

    let messages: Vec<_> = log.entries().map(|e| e.message.clone()).collect();
    assert_eq!(messages, ["step 3", "step 4", "failed bbadly/b"]);
    assert_eq!(log.count(ActivityLevel::Error), 1);
    assert_eq!(log.len(), 3);
}

#[test]
fn test_activity_entry_display() {
    let mut log = ActivityLog::default();
    log.success("Anonymization complete");

    let line = log.entries().next().unwrap().to_string();
    assert!(line.ends_with("SUCCESS: Anonymization complete"));
    assert!(line.starts_with('['));
}

#[test]
fn test_error_macro() {
    let error = SheetmaskError::Output("disk full".to_string());
    log_error_with_context!(&error, "Failed to write anonymized sheet");
}

#[test]
fn test_top_level_error_message_is_sanitized() {
    let error = anyhow::anyhow!("unexpected <tag> in input")
        .context("Failed to read <script>employees.csv</script>");

    let message = sanitize_message(&format!("{error:#}"));

    assert_eq!(
        message,
        "Failed to read scriptemployees.csv/script: unexpected tag in input"
    );
}
