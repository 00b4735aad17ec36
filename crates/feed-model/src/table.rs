//! Text-only source tables.
//!
//! Category exports are read with every cell as text. Column names are
//! case-sensitive and vary per category, so lookups go through
//! [`SourceRow::get`] which reads a missing column as an empty string.

use std::collections::HashMap;

use crate::error::{ModelError, Result};

/// A loaded category table: headers plus rectangular rows of text cells.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Creates an empty table with the given headers.
    ///
    /// When a header repeats, the first occurrence wins for lookups.
    pub fn new(headers: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(idx);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Appends a row. The row must have exactly one cell per header.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ModelError::RowWidth {
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `idx`, if present.
    pub fn row(&self, idx: usize) -> Option<SourceRow<'_>> {
        self.rows.get(idx).map(|cells| SourceRow { table: self, cells })
    }

    /// Iterates rows in input order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = SourceRow<'_>> + '_ {
        self.rows.iter().map(move |cells| SourceRow { table: self, cells })
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// Borrowed view over one record of a [`SourceTable`].
#[derive(Debug, Clone, Copy)]
pub struct SourceRow<'a> {
    table: &'a SourceTable,
    cells: &'a [String],
}

impl<'a> SourceRow<'a> {
    /// Raw value of `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .position(column)
            .and_then(|idx| self.cells.get(idx))
            .map_or("", String::as_str)
    }

    /// First non-blank value among `columns`, trimmed; `""` if none.
    ///
    /// Used for category vocabularies where the same attribute appears under
    /// several header spellings.
    pub fn first_of(&self, columns: &[&str]) -> &'a str {
        columns
            .iter()
            .map(|column| self.get(column).trim())
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}
