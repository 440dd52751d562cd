//! Observed-rate rows written by the resolver.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A new append-only observed-rate row.
///
/// Source and target are raw provider codes: the live feed may quote
/// pairs outside the supported set and those are stored as-is.
/// When an operator override exists for the pair, `rate` holds the
/// override and `rate_correction` the deviation of the live quote
/// from it (`fetched - override`); otherwise the correction is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrencyRate {
    pub source: String,
    pub target: String,
    pub rate: Decimal,
    pub rate_correction: Decimal,
    pub valid_from: DateTime<Utc>,
}
