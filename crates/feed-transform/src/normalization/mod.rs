//! Field-level normalization functions.
//!
//! - [`money`]: price text parsing
//! - [`price`]: price source selection and currency conversion
//! - [`image`]: image URL extraction and shape fallbacks

pub mod image;
pub mod money;
pub mod price;
