//! Category export ingestion.
//!
//! This crate loads the per-category inventory exports into
//! [`feed_model::SourceTable`]s and knows where each export is staged.
//!
//! # Features
//!
//! - **CSV Loading**: every cell read as text, BOM stripped, ragged rows padded
//! - **File Layout**: remote and staged file names per category
//! - **Input Overrides**: `CATEGORY=PATH` entries with unknown categories dropped
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use feed_ingest::{CategoryFile, read_source_table};
//! use feed_model::Category;
//!
//! let staged = CategoryFile::default_for(Category::Natural).staged_path(Path::new("/tmp/ftp"));
//! let table = read_source_table(&staged)?;
//! ```

mod csv_table;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{read_source_table, read_source_table_from_reader};

// === File Layout ===
pub use discovery::{CategoryFile, CategoryInput, parse_input_overrides, resolve_inputs};
