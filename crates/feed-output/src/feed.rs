//! Combined feed assembly.

use feed_model::{CanonicalRow, Category};

use crate::error::{OutputError, Result};

/// All feed rows, grouped by category in natural, lab-grown, gemstone order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedFeed {
    rows: Vec<CanonicalRow>,
}

impl CombinedFeed {
    /// Concatenates per-category rows.
    ///
    /// Parts are reordered by category; rows inside a part keep their order.
    /// Fails with [`OutputError::NoInputProcessed`] when there is nothing to
    /// write.
    pub fn assemble<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, Vec<CanonicalRow>)>,
    {
        let mut parts: Vec<(Category, Vec<CanonicalRow>)> = parts.into_iter().collect();
        parts.sort_by_key(|(category, _)| *category);

        let categories = parts.len();
        let mut feed = Self::default();
        for (_, rows) in parts {
            feed.rows.extend(rows);
        }

        if feed.rows.is_empty() {
            return Err(OutputError::NoInputProcessed);
        }
        tracing::debug!(
            rows = feed.rows.len(),
            categories,
            "assembled combined feed"
        );
        Ok(feed)
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
