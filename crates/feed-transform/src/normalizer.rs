//! Row normalization into the canonical feed schema.

use std::time::Instant;

use feed_model::{
    CanonicalRow, Category, FeedConstants, FeedOptions, PriceResolution, ResolutionSummary,
    SourceRow, SourceTable, ZeroPricePolicy,
};

use crate::normalization::image::resolve_image;
use crate::normalization::price::resolve_prices;
use crate::strategy::{CategoryStrategy, ItemAttributes, strategy_for};

/// Canonical rows for one category plus its price summary.
#[derive(Debug, Clone)]
pub struct NormalizedCategory {
    pub category: Category,
    /// Feed rows in input order.
    pub rows: Vec<CanonicalRow>,
    pub summary: ResolutionSummary,
    /// Rows with neither a primary nor a fallback identifier.
    pub missing_identifiers: usize,
}

/// Builds the canonical row for one source row.
pub fn normalize_row(
    row: &SourceRow<'_>,
    strategy: &dyn CategoryStrategy,
    price: &PriceResolution,
    constants: &FeedConstants,
) -> CanonicalRow {
    let item = ItemAttributes::from_row(row, strategy.columns());
    let id = format!("{}{}", item.identifier, constants.market_suffix);

    CanonicalRow {
        title: strategy.title(&item),
        description: strategy.description(&item),
        link: strategy.link(&item),
        image_link: resolve_image(row, strategy),
        availability: constants.availability.clone(),
        price: price.feed_value(),
        google_product_category: constants.google_product_category.clone(),
        brand: constants.brand.clone(),
        mpn: id.clone(),
        id,
        condition: constants.condition.clone(),
        color: constants.color.clone(),
        age_group: constants.age_group.clone(),
        gender: constants.gender.clone(),
    }
}

/// Normalizes a whole category table.
///
/// Output order follows input order. Rows without a resolvable price are kept
/// at `0.00` unless `options.zero_price` is [`ZeroPricePolicy::Drop`].
pub fn normalize_table(
    table: &SourceTable,
    category: Category,
    options: &FeedOptions,
) -> NormalizedCategory {
    let started = Instant::now();
    let strategy = strategy_for(category);
    let (prices, mut summary) = resolve_prices(table, strategy, &options.pricing);

    let identifier_columns = strategy.columns();
    let mut missing_identifiers = 0usize;
    let mut rows = Vec::with_capacity(table.len());
    for (row, price) in table.rows().zip(&prices) {
        if !price.is_resolved() && options.zero_price == ZeroPricePolicy::Drop {
            summary.dropped += 1;
            continue;
        }
        if row.first_of(identifier_columns.identifier).is_empty()
            && row.first_of(identifier_columns.fallback_identifier).is_empty()
        {
            missing_identifiers += 1;
        }
        rows.push(normalize_row(&row, strategy, price, &options.constants));
    }

    if missing_identifiers > 0 {
        tracing::warn!(
            category = %category,
            rows = missing_identifiers,
            "rows without a report number or stock id"
        );
    }
    if summary.dropped > 0 {
        tracing::info!(
            category = %category,
            dropped = summary.dropped,
            "dropped rows without a resolvable price"
        );
    }
    tracing::info!(
        category = %category,
        input_rows = table.len(),
        output_rows = rows.len(),
        duration_ms = started.elapsed().as_millis(),
        "normalized category"
    );

    NormalizedCategory {
        category,
        rows,
        summary,
        missing_identifiers,
    }
}
