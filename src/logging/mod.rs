//! Logging and observability
//!
//! - Structured `tracing` output to the console and an optional rotating
//!   JSON file ([`init_logging`])
//! - The bounded, user-facing [`ActivityLog`]
//!
//! Log events carry counts, categories, and row/column positions. Cell content
//! is never logged.
//!
//! # Example
//!
//! ```no_run
//! use sheetmask::logging::init_logging;
//! use sheetmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod activity;
pub mod structured;

// Re-export commonly used items
pub use activity::{sanitize_message, ActivityEntry, ActivityLevel, ActivityLog};
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an anonymization run
///
/// # Example
///
/// ```no_run
/// use sheetmask::log_run_start;
///
/// log_run_start!("employees.csv", "contextual");
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($source:expr, $mode:expr) => {
        tracing::info!(
            source = %$source,
            mode = %$mode,
            "Starting anonymization"
        );
    };
}

/// Log the completion of an anonymization run
///
/// # Example
///
/// ```no_run
/// use sheetmask::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(42, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            substitutions = $count,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use sheetmask::log_error_with_context;
/// use sheetmask::domain::SheetmaskError;
///
/// let error = SheetmaskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
