//! Merchant feed transformation crate.
//!
//! Turns per-category [`SourceTable`](feed_model::SourceTable)s into
//! [`CanonicalRow`](feed_model::CanonicalRow)s.
//!
//! # Overview
//!
//! - **Money parsing**: free-form price text to an amount
//! - **Price resolution**: ordered price sources per category, currency fallback, conversion
//! - **Image resolution**: URL extraction with a shape-keyed fallback table
//! - **Category strategies**: column vocabularies and title/description/link templates
//! - **Normalization**: one canonical row per source row, input order preserved
//!
//! # Example
//!
//! ```ignore
//! use feed_model::{Category, FeedOptions};
//! use feed_transform::normalize_table;
//!
//! let normalized = normalize_table(&table, Category::Natural, &FeedOptions::default());
//! println!("{} rows, {} priced", normalized.rows.len(), normalized.summary.priced);
//! ```
//!
//! # Design Principles
//!
//! - **Never fail a row**: unparsable values degrade to empty or zero
//! - **Stateless functions**: everything is driven by the category strategy and options

mod normalizer;

pub mod normalization;
pub mod strategy;

pub use normalization::image::{extract_image_url, resolve_image, shape_image_url, shape_table};
pub use normalization::money::{parse_money, parse_quantity};
pub use normalization::price::{resolve_prices, resolve_row_price, round_to_cents};
pub use normalizer::{NormalizedCategory, normalize_row, normalize_table};
pub use strategy::{CategoryStrategy, ColumnSet, ItemAttributes, PriceSources, strategy_for};
