//! # Error Handling
//!
//! This module defines the error type for the failures that abort a run as a
//! whole: a configuration file that cannot be found or decoded, and a working
//! directory that cannot be entered or restored.
//!
//! Failures of individual `git` invocations are deliberately *not* represented
//! here. Those are reified into [`CommandOutcome`](crate::executor::CommandOutcome)
//! values by the executor and folded into the run result, so one broken
//! repository never stops the rest of the fleet from being processed.
//!
//! The `Result` type alias is used to return `Result<T, Error>` from library
//! functions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mrpatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file exists but does not describe a patch set.
    #[error("Configuration parsing error in {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The process working directory could not be changed.
    #[error("Cannot change directory to {}: {message}", path.display())]
    WorkingDirectory { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON decoding error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
