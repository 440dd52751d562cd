//! Rate store port.
//!
//! Adapters (Postgres, SQLite, in-memory test doubles) implement this
//! trait. The historical table is append-only; the override table is
//! operator-managed and versioned, latest `valid_from` wins.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Currency, NewCurrencyRate};
use crate::error::RepoError;

#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    /// Most recent stored rate for the pair with `valid_from <= now`.
    /// Future-dated rows are never eligible.
    async fn latest_rate(
        &self,
        source: Currency,
        target: Currency,
        now: DateTime<Utc>,
    ) -> Result<Option<Decimal>, RepoError>;

    /// Operator-configured override for the pair, if any.
    ///
    /// Keyed by raw code strings so the resolver can check sub-pairs
    /// straight off the provider feed.
    async fn override_rate(&self, source: &str, target: &str)
    -> Result<Option<Decimal>, RepoError>;

    /// Appends a new version of an override. Existing versions stay;
    /// reads pick the latest `valid_from`.
    async fn add_override_rate(
        &self,
        source: &str,
        target: &str,
        rate: Decimal,
        valid_from: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    /// Appends observed rates. Rows are never mutated or deleted.
    async fn record_rates(&self, rates: Vec<NewCurrencyRate>) -> Result<(), RepoError>;
}
