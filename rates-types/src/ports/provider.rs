//! Live-rates provider port.
//!
//! Implementations are HTTP clients against the FX feed; retry policy
//! lives behind this trait, never in the resolver.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::Currency;
use crate::error::ServiceError;

#[async_trait::async_trait]
pub trait LiveRateProvider: Send + Sync + 'static {
    /// Fetches quotes for every supported currency relative to
    /// `source` in one request, as the provider's flat 6-character
    /// token map (e.g. "USDAED" -> 3.67).
    async fn live_rates(&self, source: Currency)
    -> Result<HashMap<String, Decimal>, ServiceError>;
}
