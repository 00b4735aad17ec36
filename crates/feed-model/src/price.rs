//! Price resolution outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which candidate produced a row's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSourceLabel {
    /// A direct price column.
    Field(&'static str),
    /// Per-unit price multiplied by a quantity column.
    PerUnit {
        price: &'static str,
        quantity: &'static str,
    },
    /// No candidate yielded a positive amount.
    Unresolved,
}

impl fmt::Display for PriceSourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(column) => f.write_str(column),
            Self::PerUnit { price, quantity } => write!(f, "{price}×{quantity}"),
            Self::Unresolved => f.write_str("unresolved"),
        }
    }
}

/// Resolved price of one source row, already in the target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResolution {
    /// Amount in the target currency, rounded to 2 decimals.
    pub amount: f64,
    /// Currency the source amount was read in.
    pub source_currency: String,
    /// Currency of `amount`.
    pub target_currency: String,
    pub source: PriceSourceLabel,
}

impl PriceResolution {
    /// A candidate won and the converted amount is above zero.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.source, PriceSourceLabel::Unresolved) && self.amount > 0.0
    }

    /// Feed representation: `<amount with 2 decimals> <CODE>`.
    pub fn feed_value(&self) -> String {
        format!("{:.2} {}", self.amount, self.target_currency)
    }
}

/// Aggregate price outcomes for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub rows: usize,
    pub priced: usize,
    pub unresolved: usize,
    /// Rows excluded by the zero-price policy.
    pub dropped: usize,
    /// Converted amounts summed over priced rows.
    pub total_amount: f64,
    /// Winning source label -> row count.
    pub sources: BTreeMap<String, usize>,
}

impl ResolutionSummary {
    pub fn record(&mut self, resolution: &PriceResolution) {
        self.rows += 1;
        let label = if resolution.is_resolved() {
            self.priced += 1;
            self.total_amount += resolution.amount;
            resolution.source
        } else {
            self.unresolved += 1;
            PriceSourceLabel::Unresolved
        };
        *self.sources.entry(label.to_string()).or_default() += 1;
    }
}
