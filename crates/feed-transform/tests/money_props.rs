//! Property tests for price text parsing.

use feed_transform::{parse_money, parse_quantity, round_to_cents};
use proptest::prelude::*;

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

proptest! {
    #[test]
    fn never_panics_and_stays_finite(text in ".*") {
        if let Some(amount) = parse_money(&text) {
            prop_assert!(amount.is_finite());
        }
    }

    #[test]
    fn decorated_amounts_parse_back(
        whole in 0u64..10_000_000,
        cents in 0u64..100,
        prefix in prop::sample::select(vec!["", "$", "€", "£", " $ "]),
        suffix in prop::sample::select(vec!["", " USD", " cad", "EUR", " "]),
    ) {
        let text = format!("{prefix}{}.{cents:02}{suffix}", group_thousands(whole));
        let expected = whole as f64 + cents as f64 / 100.0;

        let parsed = parse_money(&text);

        prop_assert!(parsed.is_some(), "failed to parse {text:?}");
        let parsed = parsed.unwrap_or_default();
        prop_assert!((parsed - expected).abs() < 1e-6, "{text:?} -> {parsed}");
    }

    #[test]
    fn text_without_digits_is_unusable(text in "[a-zA-Z $,]*") {
        prop_assert_eq!(parse_money(&text), None);
    }

    #[test]
    fn quantities_accept_separators(whole in 0u64..1_000_000) {
        prop_assert_eq!(
            parse_quantity(&format!(" {} ", group_thousands(whole))),
            Some(whole as f64)
        );
    }

    #[test]
    fn rounding_is_idempotent(amount in -1.0e9f64..1.0e9) {
        let once = round_to_cents(amount);
        prop_assert_eq!(round_to_cents(once), once);
    }
}
