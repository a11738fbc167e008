use crate::error::DiscountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Vendor product service response, reduced to the price path we read
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub optimized_price: Option<OptimizedPrice>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPrice {
    pub display_price: Option<DisplayPrice>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayPrice {
    /// Kept raw so a non-numeric price can be reported rather than misread
    pub value: Option<serde_json::Value>,
}

impl ProductResponse {
    /// The `optimizedPrice.displayPrice.value` field, if the whole path is present
    pub fn display_price(&self) -> Option<&serde_json::Value> {
        self.optimized_price.as_ref()?.display_price.as_ref()?.value.as_ref()
    }
}

/// Multiplier applied to the vendor's displayed price
///
/// Any finite value is accepted. Values outside `[0, 1]` are passed through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount(f64);

impl Discount {
    pub const NONE: Discount = Discount(1.0);

    pub fn new(factor: f64) -> Result<Self, DiscountError> {
        if factor.is_finite() {
            Ok(Self(factor))
        } else {
            Err(DiscountError::NotFinite(factor.to_string()))
        }
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    /// Multiply a displayed price, rounding to cents with halves away from zero
    ///
    /// Both operands are taken from their shortest decimal form, so `19.99 * 0.5`
    /// is `9.995` and rounds to `10.00`. Returns `None` if either value has no
    /// decimal representation or the product overflows.
    pub fn apply(&self, price: f64) -> Option<Decimal> {
        let price = to_decimal(price)?;
        let factor = to_decimal(self.0)?;
        let total = price.checked_mul(factor)?;
        Some(total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::NONE
    }
}

impl FromStr for Discount {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let factor: f64 =
            trimmed.parse().map_err(|_| DiscountError::NotANumber(trimmed.to_string()))?;
        if !factor.is_finite() {
            return Err(DiscountError::NotFinite(trimmed.to_string()));
        }
        Ok(Self(factor))
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // f64's Display is the shortest string that round-trips, never exponent form
    Decimal::from_str(&value.to_string()).ok()
}

/// Render an amount with trailing zeros dropped but at least one fractional digit
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Outcome of one price lookup
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// Discounted price, already rounded to cents
    Price(Decimal),

    /// The vendor answered but had no price for the product
    InvalidId,
}

/// A price lookup result for one product ID
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub product_id: String,
    pub outcome: QuoteOutcome,
}

impl PriceQuote {
    pub fn price(product_id: impl Into<String>, amount: Decimal) -> Self {
        Self { product_id: product_id.into(), outcome: QuoteOutcome::Price(amount) }
    }

    pub fn invalid(product_id: impl Into<String>) -> Self {
        Self { product_id: product_id.into(), outcome: QuoteOutcome::InvalidId }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self.outcome {
            QuoteOutcome::Price(amount) => Some(amount),
            QuoteOutcome::InvalidId => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, QuoteOutcome::Price(_))
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            QuoteOutcome::Price(amount) => write!(f, "${}", format_amount(*amount)),
            QuoteOutcome::InvalidId => write!(
                f,
                "The ID associated with that product ({}) is not valid!",
                self.product_id
            ),
        }
    }
}
