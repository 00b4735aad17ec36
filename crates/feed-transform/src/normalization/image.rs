//! Image URL resolution.
//!
//! Exports put images in a free-text column that may hold a bare URL, a URL
//! wrapped in other text, a video link, or nothing. When no direct image URL
//! is found, a generic picture of the stone's shape is used instead.

use std::sync::LazyLock;

use feed_model::SourceRow;
use regex::Regex;

use crate::strategy::CategoryStrategy;

/// First http(s) URL whose path ends in a still-image extension. The body is
/// greedy, so an extension-like piece inside the host or path is skipped; the
/// URL must end at whitespace, quoting, a query, a fragment, or end of text.
static IMAGE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(https?://[^\s"'<>,?#]+\.(?:jpe?g|png|webp))(?:$|[\s"'<>,?#)\]])"#)
        .expect("Invalid image URL regex")
});

macro_rules! shape_url {
    ($file:literal) => {
        concat!(
            "https://storage.googleapis.com/sitemaps.leeladiamond.com/shapes/",
            $file
        )
    };
}

/// Shape (upper-case) -> fallback image URL, sorted by shape.
const SHAPE_IMAGE_URLS: &[(&str, &str)] = &[
    ("ASSCHER", shape_url!("ASSCHER.jpg")),
    ("BAGUETTE", shape_url!("BAGUETTE.jpg")),
    ("BRIOLETTE", shape_url!("BRIOLETTE.webp")),
    ("BULLET", shape_url!("BULLET.jpeg")),
    ("CALF", shape_url!("CALF.webp")),
    ("CUSHION", shape_url!("CUSHION.jpg")),
    ("CUSHION BRILLIANT", shape_url!("CUSHION%20BRILLIANT.webp")),
    ("CUSHION MODIFIED", shape_url!("CUSHION%20MODIFIED.jpg")),
    ("EMERALD", shape_url!("EMERALD.jpg")),
    ("EUROPEAN CUT", shape_url!("EUROPEAN%20CUT.webp")),
    ("HALF MOON", shape_url!("HALF%20MOON.jpg")),
    ("HEART", shape_url!("HEART.png")),
    ("HEPTAGONAL", shape_url!("HEPTAGONAL.webp")),
    ("HEXAGONAL", shape_url!("HEXAGONAL.webp")),
    ("KITE", shape_url!("KITE.jpg")),
    ("LOZENGE", shape_url!("LOZENGE.jpg")),
    ("MARQUISE", shape_url!("MARQUISE.jpg")),
    ("NONAGONAL", shape_url!("NONAGONAL.jpg")),
    ("OCTAGONAL", shape_url!("OCTAGONAL.jpg")),
    ("OLD MINER", shape_url!("OLD%20MINER.webp")),
    ("OTHER", shape_url!("OTHER.webp")),
    ("OVAL", shape_url!("OVAL.webp")),
    ("PEAR", shape_url!("PEAR%20MODIFIED%20BRILLIANT.webp")),
    ("PEAR MODIFIED BRILLIANT", shape_url!("PEAR.jpg")),
    ("PENTAGONAL", shape_url!("PENTAGONAL.jpg")),
    ("PRINCESS", shape_url!("PRINCESS.jpg")),
    ("RADIANT", shape_url!("RADIANT.jpg")),
    ("RECTANGULAR", shape_url!("RECTANGULAR.webp")),
    ("RHOMBOID", shape_url!("RHOMBOID.jpg")),
    ("ROSE", shape_url!("ROSE.webp")),
    ("ROUND", shape_url!("ROUND.png")),
    ("SHIELD", shape_url!("SHIELD.webp")),
    ("SQUARE", shape_url!("SQUARE%20EMERALD.webp")),
    ("SQUARE EMERALD", shape_url!("SQUARE%20EMERALD.webp")),
    ("SQUARE RADIANT", shape_url!("SQUARE%20RADIANT.webp")),
    ("STAR", shape_url!("STAR.jpg")),
    ("TAPERED BAGUETTE", shape_url!("TAPERED%20BAGUETTE.jpg")),
    ("TRAPEZOID", shape_url!("TRAPEZOID.jpg")),
    ("TRIANGULAR", shape_url!("TRIANGULAR.webp")),
    ("TRILLIANT", shape_url!("TRILLIANT.jpg")),
];

/// Extracts the first direct image URL from free text.
pub fn extract_image_url(text: &str) -> Option<&str> {
    IMAGE_URL_REGEX
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str())
}

/// Fallback image for a shape. The shape is trimmed and upper-cased first.
pub fn shape_image_url(shape: &str) -> Option<&'static str> {
    let key = shape.trim().to_uppercase();
    SHAPE_IMAGE_URLS
        .binary_search_by(|(candidate, _)| (*candidate).cmp(key.as_str()))
        .ok()
        .map(|idx| SHAPE_IMAGE_URLS[idx].1)
}

/// The full shape fallback table.
pub fn shape_table() -> &'static [(&'static str, &'static str)] {
    SHAPE_IMAGE_URLS
}

/// Image link for a row: a URL found in the image column(s), else the shape
/// fallback, else an empty string.
pub fn resolve_image(row: &SourceRow<'_>, strategy: &dyn CategoryStrategy) -> String {
    let columns = strategy.columns();
    let direct = columns
        .image
        .iter()
        .find_map(|column| extract_image_url(row.get(column)));
    if let Some(url) = direct {
        return url.to_string();
    }
    shape_image_url(row.first_of(columns.shape))
        .unwrap_or_default()
        .to_string()
}
