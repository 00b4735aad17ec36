//! Error types for feed output.

use std::path::PathBuf;

use feed_model::ModelError;
use thiserror::Error;

/// Errors raised while assembling, writing, or reading a feed file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Every category was missing, failed to load, or produced no rows.
    #[error("no input files were processed; combined feed not created")]
    NoInputProcessed,

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("feed header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
