//! Conversion engine.
//!
//! Applies a resolved rate to client amounts: optional per-pair markup,
//! rounding to the target currency's precision, and a sanity filter
//! that silently drops non-positive results.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use rates_types::{Currency, CurrencyPair, MoneyAmount, RateSource, ServiceError};

use crate::buffer::ConversionBuffers;

pub struct ConversionService<S> {
    rates: Arc<S>,
    buffers: Option<ConversionBuffers>,
}

impl<S: RateSource> ConversionService<S> {
    /// `buffers: None` disables markup entirely; every pair converts at
    /// the raw resolved rate.
    pub fn new(rates: Arc<S>, buffers: Option<ConversionBuffers>) -> Self {
        Self { rates, buffers }
    }

    pub async fn convert_one(
        &self,
        source: Currency,
        target: Currency,
        value: Decimal,
    ) -> Result<Decimal, ServiceError> {
        let results = self.convert_many(source, target, &[value]).await?;
        results.get(&value).copied().ok_or_else(|| {
            ServiceError::NoQuoteFound(CurrencyPair::new(source, target).to_string())
        })
    }

    /// Converts a batch in one rate lookup. The result maps each input
    /// to its converted amount; inputs whose conversion fails the
    /// sanity filter are absent, and duplicates collapse.
    pub async fn convert_many(
        &self,
        source: Currency,
        target: Currency,
        values: &[Decimal],
    ) -> Result<HashMap<Decimal, Decimal>, ServiceError> {
        if values.is_empty() {
            return Err(ServiceError::InvalidArgument("values".to_string()));
        }
        if source == target {
            return Ok(values.iter().map(|v| (*v, *v)).collect());
        }

        let rate = self.rates.rate(source, target).await?;
        let effective = self.effective_rate(rate, source, target);
        Ok(convert_batch(values, effective, target))
    }

    /// Currency-tagged projection of the same computation, with no
    /// markup applied on either side.
    pub async fn convert_amounts(
        &self,
        source: Currency,
        target: Currency,
        values: &[Decimal],
    ) -> Result<HashMap<MoneyAmount, MoneyAmount>, ServiceError> {
        if values.is_empty() {
            return Err(ServiceError::InvalidArgument("values".to_string()));
        }
        let converted: HashMap<Decimal, Decimal> = if source == target {
            values.iter().map(|v| (*v, *v)).collect()
        } else {
            let rate = self.rates.rate(source, target).await?;
            convert_batch(values, rate, target)
        };
        Ok(converted
            .into_iter()
            .map(|(input, output)| {
                (
                    MoneyAmount::new(input, source),
                    MoneyAmount::new(output, target),
                )
            })
            .collect())
    }

    fn effective_rate(&self, rate: Decimal, source: Currency, target: Currency) -> Decimal {
        match &self.buffers {
            Some(buffers) => rate * (Decimal::ONE + buffers.buffer(source, target)),
            None => rate,
        }
    }
}

fn convert_batch(
    values: &[Decimal],
    rate: Decimal,
    target: Currency,
) -> HashMap<Decimal, Decimal> {
    values
        .iter()
        .filter_map(|value| {
            let rounded = (value * rate).round_dp_with_strategy(
                target.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            );
            is_sane(rounded).then_some((*value, rounded))
        })
        .collect()
}

fn is_sane(value: Decimal) -> bool {
    value > Decimal::ZERO
}
