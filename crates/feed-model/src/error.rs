use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown product category '{0}'")]
    UnknownCategory(String),
    #[error("expected {expected} feed fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("row has {found} cells but the table declares {expected} columns")]
    RowWidth { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
