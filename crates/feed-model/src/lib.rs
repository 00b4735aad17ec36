//! Merchant feed data model.
//!
//! Types shared by every stage of the feed pipeline:
//!
//! - [`Category`]: the three product lines and their feed order
//! - [`SourceTable`] / [`SourceRow`]: text-only input tables with lenient lookups
//! - [`CanonicalRow`]: the fixed 14-column output schema
//! - [`PricingOptions`], [`FeedOptions`]: explicit configuration for the transform stage
//! - [`PriceResolution`], [`ResolutionSummary`]: per-row and per-category price outcomes

pub mod canonical;
pub mod category;
pub mod error;
pub mod options;
pub mod price;
pub mod table;

pub use canonical::{CANONICAL_COLUMNS, CanonicalRow};
pub use category::Category;
pub use error::{ModelError, Result};
pub use options::{FeedConstants, FeedOptions, PricingOptions, ZeroPricePolicy};
pub use price::{PriceResolution, PriceSourceLabel, ResolutionSummary};
pub use table::{SourceRow, SourceTable};
