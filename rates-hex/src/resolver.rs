//! Rate resolution pipeline.
//!
//! A requested pair walks an ordered fallback chain: identity,
//! operator override, hour-aligned cache, live provider fetch, and
//! finally the historical store. Only successful resolutions are
//! cached; a failed fetch is retried on the next request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use rates_types::{
    Currency, CurrencyPair, LiveRateProvider, NewCurrencyRate, RateSource, RateStore, ServiceError,
};

use crate::cache::HourlyCache;
use crate::codec::split_quotes;

const CACHE_NAMESPACE: &str = "RateService";
const CACHE_OPERATION: &str = "get";

/// Capability switches for deployment variants.
#[derive(Debug, Clone, Copy)]
pub struct ResolverOptions {
    /// Consult the operator override table before cache and provider.
    pub use_overrides: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self { use_overrides: true }
    }
}

pub struct RateResolver<S, P> {
    store: Arc<S>,
    provider: Arc<P>,
    cache: HourlyCache<Decimal>,
    options: ResolverOptions,
}

impl<S: RateStore, P: LiveRateProvider> RateResolver<S, P> {
    pub fn new(store: Arc<S>, provider: Arc<P>, options: ResolverOptions) -> Self {
        Self {
            store,
            provider,
            cache: HourlyCache::new(),
            options,
        }
    }

    pub async fn resolve(&self, source: Currency, target: Currency) -> Result<Decimal, ServiceError> {
        if source == target {
            return Ok(Decimal::ONE);
        }

        if self.options.use_overrides {
            if let Some(rate) = self.store.override_rate(source.code(), target.code()).await? {
                debug!(%source, %target, %rate, "override rate applied");
                return Ok(rate);
            }
        }

        let key = cache_key(source, target);
        if let Some(rate) = self.cache.get(&key) {
            return Ok(rate);
        }

        let _guard = self.cache.lock_key(&key).await;
        // Another request may have resolved the pair while we waited.
        if let Some(rate) = self.cache.get(&key) {
            return Ok(rate);
        }

        let rate = self.fetch_rate(source, target).await?;
        self.cache.insert(&key, rate);
        Ok(rate)
    }

    async fn fetch_rate(&self, source: Currency, target: Currency) -> Result<Decimal, ServiceError> {
        let quotes = self.provider.live_rates(source).await?;
        let pairs = split_quotes(&quotes)?;
        self.record_batch(&pairs).await?;

        let wanted = (source.code().to_string(), target.code().to_string());
        if let Some(rate) = pairs.get(&wanted) {
            info!(%source, %target, %rate, "live rate resolved");
            return Ok(*rate);
        }

        // The provider does not quote every pair; fall back to the most
        // recent stored observation.
        match self.store.latest_rate(source, target, Utc::now()).await? {
            Some(rate) => {
                info!(%source, %target, %rate, "historical rate resolved");
                Ok(rate)
            }
            None => Err(ServiceError::NoQuoteFound(
                CurrencyPair::new(source, target).to_string(),
            )),
        }
    }

    /// Persists a fetched batch. A pair under an active override is
    /// stored at the override value, with the gap to the fetched quote
    /// kept as an audit correction.
    async fn record_batch(
        &self,
        pairs: &HashMap<(String, String), Decimal>,
    ) -> Result<(), ServiceError> {
        let now = Utc::now();
        let mut rows = Vec::with_capacity(pairs.len());
        for ((source, target), fetched) in pairs {
            let override_rate = if self.options.use_overrides {
                self.store.override_rate(source, target).await?
            } else {
                None
            };
            let row = match override_rate {
                Some(rate) => NewCurrencyRate {
                    source: source.clone(),
                    target: target.clone(),
                    rate,
                    rate_correction: *fetched - rate,
                    valid_from: now,
                },
                None => NewCurrencyRate {
                    source: source.clone(),
                    target: target.clone(),
                    rate: *fetched,
                    rate_correction: Decimal::ZERO,
                    valid_from: now,
                },
            };
            rows.push(row);
        }
        self.store.record_rates(rows).await?;
        Ok(())
    }
}

fn cache_key(source: Currency, target: Currency) -> String {
    format!("{CACHE_NAMESPACE}:{CACHE_OPERATION}:{source}:{target}")
}

#[async_trait]
impl<S: RateStore, P: LiveRateProvider> RateSource for RateResolver<S, P> {
    async fn rate(&self, source: Currency, target: Currency) -> Result<Decimal, ServiceError> {
        self.resolve(source, target).await
    }
}
