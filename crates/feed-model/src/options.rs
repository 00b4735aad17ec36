//! Configuration options for feed normalization.

use serde::{Deserialize, Serialize};

/// Currency settings for price resolution.
///
/// Only one conversion is supported: `base_currency` -> `target_currency`
/// at `exchange_rate`. Any other source currency is treated as the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOptions {
    /// Currency assumed when a row has no usable currency code.
    pub base_currency: String,
    /// Currency every output price is expressed in.
    pub target_currency: String,
    /// Multiplier from base to target.
    pub exchange_rate: f64,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            target_currency: "CAD".to_string(),
            exchange_rate: 1.41,
        }
    }
}

impl PricingOptions {
    pub fn new(
        base_currency: impl Into<String>,
        target_currency: impl Into<String>,
        exchange_rate: f64,
    ) -> Self {
        Self {
            base_currency: normalize_code(&base_currency.into()),
            target_currency: normalize_code(&target_currency.into()),
            exchange_rate,
        }
    }

    /// Normalizes a raw currency cell to a known code.
    ///
    /// Empty and unrecognized codes fall back to the base currency.
    pub fn currency_for(&self, raw: &str) -> String {
        let code = normalize_code(raw);
        if code == self.target_currency {
            code
        } else {
            self.base_currency.clone()
        }
    }

    /// Rate applied to an amount read in `currency`.
    pub fn rate_from(&self, currency: &str) -> f64 {
        if currency == self.target_currency {
            1.0
        } else {
            self.exchange_rate
        }
    }
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// What to do with rows whose price could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPricePolicy {
    /// Keep the row with a `0.00` price.
    #[default]
    Emit,
    /// Leave the row out of the feed.
    Drop,
}

/// Fixed-value feed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConstants {
    /// Appended to the item identifier to form `id` and `mpn`.
    pub market_suffix: String,
    pub availability: String,
    pub google_product_category: String,
    pub brand: String,
    pub condition: String,
    pub color: String,
    pub age_group: String,
    pub gender: String,
}

impl Default for FeedConstants {
    fn default() -> Self {
        Self {
            market_suffix: "CA".to_string(),
            availability: "in_stock".to_string(),
            google_product_category: "188".to_string(),
            brand: "Leela Diamonds".to_string(),
            condition: "new".to_string(),
            color: "white/yellow/rose gold".to_string(),
            age_group: "adult".to_string(),
            gender: "unisex".to_string(),
        }
    }
}

/// Options for normalizing category tables into feed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedOptions {
    pub pricing: PricingOptions,
    pub constants: FeedConstants,
    pub zero_price: ZeroPricePolicy,
}

impl FeedOptions {
    pub fn new(pricing: PricingOptions) -> Self {
        Self {
            pricing,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constants(mut self, constants: FeedConstants) -> Self {
        self.constants = constants;
        self
    }

    #[must_use]
    pub fn with_zero_price(mut self, policy: ZeroPricePolicy) -> Self {
        self.zero_price = policy;
        self
    }
}
