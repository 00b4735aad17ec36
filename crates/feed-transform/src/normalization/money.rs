//! Price text parsing.
//!
//! Inventory exports carry prices as free text: thousands separators,
//! currency symbols or codes, stray whitespace, and the occasional extra
//! decimal point. This module turns that text into an amount.

use std::sync::LazyLock;

use regex::Regex;

/// Currency words stripped before numeric cleanup.
static CURRENCY_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)usd|cad|inr|aud|eur").expect("Invalid currency word regex"));

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

/// Parse a price cell to an amount.
///
/// Handles:
/// - Thousands separators: "1,234.56"
/// - Currency symbols and codes: "$1,234.56", "1234.56 USD"
/// - Repeated decimal points: "1.234.56" reads as 1.23456
///
/// Returns None when nothing numeric is left. A `None` means "no usable
/// value" and must not be read as a zero price.
pub fn parse_money(value: &str) -> Option<f64> {
    let without_separators = value.replace(',', "").replace(CURRENCY_SYMBOLS, "");
    let without_words = CURRENCY_WORDS.replace_all(&without_separators, "");
    let cleaned: String = without_words
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();

    let cleaned = collapse_decimal_points(&cleaned);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Keeps the first `.` as the decimal separator and drops the rest.
fn collapse_decimal_points(value: &str) -> String {
    match value.split_once('.') {
        Some((whole, fraction)) if fraction.contains('.') => {
            format!("{whole}.{}", fraction.replace('.', ""))
        }
        _ => value.to_string(),
    }
}

/// Parse a plain quantity such as a carat weight.
///
/// Only whitespace and thousands separators are tolerated; anything else
/// makes the value unusable.
pub fn parse_quantity(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}
