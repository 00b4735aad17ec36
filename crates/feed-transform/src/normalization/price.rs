//! Price resolution.
//!
//! A row's price comes from the first candidate whose amount, once converted
//! and rounded, is strictly positive:
//!
//! 1. direct price columns, in the category's declared order
//! 2. per-unit price × quantity
//!
//! The amount is then converted from the row's currency into the target
//! currency. Rows with no usable candidate resolve to zero; that is not an
//! error.

use feed_model::{
    PriceResolution, PriceSourceLabel, PricingOptions, ResolutionSummary, SourceRow, SourceTable,
};

use super::money::{parse_money, parse_quantity};
use crate::strategy::{CategoryStrategy, PriceSources};

/// Rounds half away from zero to 2 decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// First non-blank cell among `columns`, with the column it came from.
fn first_present<'a>(
    row: &SourceRow<'a>,
    columns: &[&'static str],
) -> Option<(&'static str, &'a str)> {
    columns.iter().find_map(|column| {
        let value = row.get(column).trim();
        (!value.is_empty()).then_some((*column, value))
    })
}

/// First candidate whose converted, rounded amount is strictly positive.
///
/// Every direct column is tried, then the first usable per-unit price times
/// the first usable quantity. Blank or unparsable synonyms are skipped.
fn source_amount(
    row: &SourceRow<'_>,
    sources: &PriceSources,
    convert: impl Fn(f64) -> f64,
) -> (f64, PriceSourceLabel) {
    for &column in sources.direct {
        if let Some(amount) = parse_money(row.get(column))
            && amount > 0.0
        {
            let converted = convert(amount);
            if converted > 0.0 {
                return (converted, PriceSourceLabel::Field(column));
            }
        }
    }

    let unit = sources.unit_price.iter().find_map(|&column| {
        parse_money(row.get(column))
            .filter(|value| *value > 0.0)
            .map(|value| (column, value))
    });
    let quantity = sources.quantity.iter().find_map(|&column| {
        parse_quantity(row.get(column))
            .filter(|value| *value > 0.0)
            .map(|value| (column, value))
    });
    if let (Some((price_column, unit)), Some((quantity_column, quantity))) = (unit, quantity) {
        let amount = unit * quantity;
        let converted = convert(amount);
        if amount.is_finite() && converted > 0.0 {
            return (
                converted,
                PriceSourceLabel::PerUnit {
                    price: price_column,
                    quantity: quantity_column,
                },
            );
        }
    }

    (0.0, PriceSourceLabel::Unresolved)
}

/// Resolves one row's price in the target currency.
pub fn resolve_row_price(
    row: &SourceRow<'_>,
    sources: &PriceSources,
    pricing: &PricingOptions,
) -> PriceResolution {
    let raw_currency = first_present(row, sources.currency).map_or("", |(_, value)| value);
    let source_currency = pricing.currency_for(raw_currency);
    let rate = pricing.rate_from(&source_currency);
    let (amount, source) = source_amount(row, sources, |amount| round_to_cents(amount * rate));

    PriceResolution {
        amount,
        source_currency,
        target_currency: pricing.target_currency.clone(),
        source,
    }
}

/// Resolves every row of a category table, in input order.
pub fn resolve_prices(
    table: &SourceTable,
    strategy: &dyn CategoryStrategy,
    pricing: &PricingOptions,
) -> (Vec<PriceResolution>, ResolutionSummary) {
    let sources = strategy.price_sources();
    let mut summary = ResolutionSummary::default();
    let resolutions: Vec<PriceResolution> = table
        .rows()
        .map(|row| {
            let resolution = resolve_row_price(&row, sources, pricing);
            summary.record(&resolution);
            resolution
        })
        .collect();

    tracing::info!(
        category = %strategy.category(),
        rows = summary.rows,
        priced = summary.priced,
        unresolved = summary.unresolved,
        total_amount = summary.total_amount,
        currency = %pricing.target_currency,
        "resolved prices"
    );
    for (source, count) in &summary.sources {
        tracing::debug!(
            category = %strategy.category(),
            source = %source,
            rows = count,
            "price source"
        );
    }
    (resolutions, summary)
}
