//! Remote and staged file names per category.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use feed_model::Category;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Where a category's export lives remotely and where it is staged locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFile {
    pub category: Category,
    /// File name on the remote file source.
    pub remote_name: String,
    /// File name inside the staging directory.
    pub staged_name: String,
}

impl CategoryFile {
    /// The inventory provider's default naming for `category`.
    pub fn default_for(category: Category) -> Self {
        let (remote_name, staged_name) = match category {
            Category::Natural => ("Leela Diamond_natural.csv", "Natural.csv"),
            Category::LabGrown => ("Leela Diamond_labgrown.csv", "Labgrown.csv"),
            Category::Gemstone => ("Leela Diamond_gemstones.csv", "gemstones.csv"),
        };
        Self {
            category,
            remote_name: remote_name.to_string(),
            staged_name: staged_name.to_string(),
        }
    }

    /// Default layout for every category, in feed order.
    pub fn default_layout() -> Vec<Self> {
        Category::ALL.into_iter().map(Self::default_for).collect()
    }

    pub fn staged_path(&self, staging_dir: &Path) -> PathBuf {
        staging_dir.join(&self.staged_name)
    }
}

/// A category and the local table to load for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub category: Category,
    pub path: PathBuf,
}

/// Parses `CATEGORY=PATH` overrides.
///
/// Entries naming an unknown category are dropped with a warning; malformed
/// entries are an error. A later entry for the same category replaces an
/// earlier one.
pub fn parse_input_overrides<S: AsRef<str>>(entries: &[S]) -> Result<BTreeMap<Category, PathBuf>> {
    let mut overrides = BTreeMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        let Some((name, path)) = entry.split_once('=') else {
            return Err(IngestError::InvalidOverride(entry.to_string()));
        };
        let path = path.trim();
        if path.is_empty() {
            return Err(IngestError::InvalidOverride(entry.to_string()));
        }
        match name.parse::<Category>() {
            Ok(category) => {
                overrides.insert(category, PathBuf::from(path));
            }
            Err(error) => {
                tracing::warn!(entry = %entry, %error, "dropping input for unrecognized category");
            }
        }
    }
    Ok(overrides)
}

/// Resolves the table path for every category in feed order.
///
/// Overrides win; otherwise the staged file from `layout` is used.
pub fn resolve_inputs(
    layout: &[CategoryFile],
    staging_dir: &Path,
    overrides: &BTreeMap<Category, PathBuf>,
) -> Vec<CategoryInput> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let path = match overrides.get(&category) {
                Some(path) => path.clone(),
                None => layout
                    .iter()
                    .find(|file| file.category == category)?
                    .staged_path(staging_dir),
            };
            Some(CategoryInput { category, path })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_feed_order() {
        let layout = CategoryFile::default_layout();
        let categories: Vec<Category> = layout.iter().map(|f| f.category).collect();
        assert_eq!(categories, Category::ALL);
        assert_eq!(layout[1].remote_name, "Leela Diamond_labgrown.csv");
        assert_eq!(
            layout[2].staged_path(Path::new("/tmp/ftp")),
            PathBuf::from("/tmp/ftp/gemstones.csv")
        );
    }

    #[test]
    fn overrides_drop_unknown_categories() {
        let overrides =
            parse_input_overrides(&["natural=/data/n.csv", "pearls=/data/p.csv"]).unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(
            overrides.get(&Category::Natural),
            Some(&PathBuf::from("/data/n.csv"))
        );
    }

    #[test]
    fn overrides_reject_malformed_entries() {
        assert!(matches!(
            parse_input_overrides(&["natural"]),
            Err(IngestError::InvalidOverride(_))
        ));
        assert!(matches!(
            parse_input_overrides(&["natural= "]),
            Err(IngestError::InvalidOverride(_))
        ));
    }

    #[test]
    fn resolve_prefers_overrides() {
        let layout = CategoryFile::default_layout();
        let mut overrides = BTreeMap::new();
        overrides.insert(Category::Gemstone, PathBuf::from("/elsewhere/gems.csv"));

        let inputs = resolve_inputs(&layout, Path::new("/stage"), &overrides);

        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0].path, PathBuf::from("/stage/Natural.csv"));
        assert_eq!(inputs[2].path, PathBuf::from("/elsewhere/gems.csv"));
    }
}
