//! Merchant feed output library.
//!
//! Concatenates normalized category rows into one [`CombinedFeed`] and
//! serializes it as the 14-column feed file:
//!
//! - UTF-8, one header row in [`CANONICAL_COLUMNS`](feed_model::CANONICAL_COLUMNS) order
//! - fields quoted only when needed
//! - embedded quotes escaped with a backslash rather than doubled

mod error;
mod feed;
mod writer;

pub use error::{OutputError, Result};
pub use feed::CombinedFeed;
pub use writer::{FEED_FILE_NAME, content_type_for, read_feed, write_feed, write_feed_to};
