//! Resolved-rate port.
//!
//! The conversion engine depends on this instead of the concrete
//! resolver, which keeps it testable with a scripted rate source.

use rust_decimal::Decimal;

use crate::domain::Currency;
use crate::error::ServiceError;

#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Returns how many units of `target` one unit of `source` buys.
    async fn rate(&self, source: Currency, target: Currency) -> Result<Decimal, ServiceError>;
}
