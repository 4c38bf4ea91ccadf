// Sheetmask - Field-level de-identification for HR and equity spreadsheets
// Copyright (c) 2025 Sheetmask Contributors
// Licensed under the MIT License

//! # Sheetmask - Spreadsheet De-identification
//!
//! Sheetmask replaces personally identifying and financially sensitive values
//! in HR and equity spreadsheets with tokens, masks, shifted dates, rounded or
//! banded amounts, and placeholders, while recording every substitution in a
//! mapping ledger.
//!
//! ## Overview
//!
//! A run goes through four stages:
//! - **Classifying** columns by matching header text against a synonym library
//! - **Selecting** the columns to anonymize (suggestions plus user overrides)
//! - **Transforming** each non-blank cell of the selected columns under one of
//!   three modes (strict, contextual, range)
//! - **Writing** the anonymized sheet and the ledger
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Classification, transforms, ledger, reports
//! - [`io`] - Bounded file reading and sheet codecs
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and the activity log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetmask::anonymization::{
//!     AnonymizationConfig, AnonymizationEngine, AnonymizationMode, AnonymizationSession,
//! };
//! use sheetmask::io::{load_sheet, InputLimits};
//! use sheetmask::logging::ActivityLog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = Arc::new(AnonymizationEngine::new(AnonymizationConfig::default())?);
//! let loaded = load_sheet(Path::new("employees.csv"), &InputLimits::default()).await?;
//!
//! let mut session =
//!     AnonymizationSession::analyze(engine, loaded.file_name, loaded.sheet, ActivityLog::default())?;
//! let output = session.run(AnonymizationMode::Contextual)?;
//!
//! println!("Replaced {} cells", output.ledger.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Input and configuration problems surface as [`domain::SheetmaskError`] and
//! abort the run. A failure on a single cell is logged with its position and
//! the cell is left unchanged; the rest of the sheet is still processed.
//!
//! ## Logging
//!
//! Sheetmask uses structured logging with the `tracing` crate. Events carry
//! counts, categories, and cell positions, never cell content.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
