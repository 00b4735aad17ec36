//! Category strategies.
//!
//! Each product line has its own column vocabulary, price sources, and text
//! templates. A [`CategoryStrategy`] bundles all of them so the normalizer
//! never branches on the category itself.

mod diamond;
mod gemstone;

use feed_model::{Category, SourceRow};

pub use diamond::{LabGrownDiamond, NaturalDiamond};
pub use gemstone::Gemstone;

/// Header spellings for each attribute, in lookup order.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSet {
    /// Stable item identifier (report / certificate number).
    pub identifier: &'static [&'static str],
    /// Used when `identifier` is blank.
    pub fallback_identifier: &'static [&'static str],
    pub image: &'static [&'static str],
    pub shape: &'static [&'static str],
    pub carats: &'static [&'static str],
    pub color: &'static [&'static str],
    pub clarity: &'static [&'static str],
    pub cut: &'static [&'static str],
    pub polish: &'static [&'static str],
    pub symmetry: &'static [&'static str],
    pub fluorescence: &'static [&'static str],
    pub lab: &'static [&'static str],
    pub length: &'static [&'static str],
    pub width: &'static [&'static str],
    pub height: &'static [&'static str],
    pub table: &'static [&'static str],
    pub depth: &'static [&'static str],
    pub gem_type: &'static [&'static str],
    pub treatment: &'static [&'static str],
    pub origin: &'static [&'static str],
}

/// Ordered price candidates for a category.
#[derive(Debug, Clone, Copy)]
pub struct PriceSources {
    /// Direct price columns, highest priority first.
    pub direct: &'static [&'static str],
    /// Per-unit price columns for the derived candidate.
    pub unit_price: &'static [&'static str],
    /// Quantity columns multiplied with `unit_price`.
    pub quantity: &'static [&'static str],
    /// Columns carrying the row's currency code.
    pub currency: &'static [&'static str],
}

/// Attribute values of one row, looked up through a [`ColumnSet`].
///
/// Every field is trimmed; missing attributes are empty. `shape` is also
/// upper-cased since it doubles as the image table key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAttributes<'a> {
    /// Identifier without the market suffix.
    pub identifier: &'a str,
    pub shape: String,
    pub carats: &'a str,
    pub color: &'a str,
    pub clarity: &'a str,
    pub cut: &'a str,
    pub polish: &'a str,
    pub symmetry: &'a str,
    pub fluorescence: &'a str,
    pub lab: &'a str,
    pub length: &'a str,
    pub width: &'a str,
    pub height: &'a str,
    pub table: &'a str,
    pub depth: &'a str,
    pub gem_type: &'a str,
    pub treatment: &'a str,
    pub origin: &'a str,
}

impl<'a> ItemAttributes<'a> {
    pub fn from_row(row: &SourceRow<'a>, columns: &ColumnSet) -> Self {
        let identifier = match row.first_of(columns.identifier) {
            "" => row.first_of(columns.fallback_identifier),
            primary => primary,
        };
        Self {
            identifier,
            shape: row.first_of(columns.shape).to_uppercase(),
            carats: row.first_of(columns.carats),
            color: row.first_of(columns.color),
            clarity: row.first_of(columns.clarity),
            cut: row.first_of(columns.cut),
            polish: row.first_of(columns.polish),
            symmetry: row.first_of(columns.symmetry),
            fluorescence: row.first_of(columns.fluorescence),
            lab: row.first_of(columns.lab),
            length: row.first_of(columns.length),
            width: row.first_of(columns.width),
            height: row.first_of(columns.height),
            table: row.first_of(columns.table),
            depth: row.first_of(columns.depth),
            gem_type: row.first_of(columns.gem_type),
            treatment: row.first_of(columns.treatment),
            origin: row.first_of(columns.origin),
        }
    }
}

/// Everything category-specific about building a feed row.
pub trait CategoryStrategy: Send + Sync {
    fn category(&self) -> Category;

    fn columns(&self) -> &ColumnSet;

    fn price_sources(&self) -> &PriceSources;

    fn title(&self, item: &ItemAttributes<'_>) -> String;

    fn description(&self, item: &ItemAttributes<'_>) -> String;

    fn link(&self, item: &ItemAttributes<'_>) -> String;
}

/// Returns the strategy for `category`.
pub fn strategy_for(category: Category) -> &'static dyn CategoryStrategy {
    match category {
        Category::Natural => &NaturalDiamond,
        Category::LabGrown => &LabGrownDiamond,
        Category::Gemstone => &Gemstone,
    }
}
