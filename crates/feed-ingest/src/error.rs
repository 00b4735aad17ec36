//! Error types for category ingestion.

use std::path::PathBuf;

use feed_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a category export.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV record.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row present but every column name is blank.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Input override was not `CATEGORY=PATH`.
    #[error("invalid input override '{0}': expected CATEGORY=PATH")]
    InvalidOverride(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/tmp/ftp/Natural.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /tmp/ftp/Natural.csv");
    }

    #[test]
    fn test_error_from_model() {
        let err: IngestError = ModelError::UnknownCategory("x".into()).into();
        assert!(matches!(err, IngestError::Model(_)));
    }
}
