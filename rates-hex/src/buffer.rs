//! Multiplicative conversion markup, per currency pair.

use std::collections::HashMap;

use rust_decimal::Decimal;

use rates_types::{Currency, CurrencyPair};

/// Pair-keyed markup table with a fallback default.
///
/// The default buffer is 0.5%. AED and USD are pegged, so both
/// directions of that pair carry a zero buffer out of the box.
#[derive(Debug, Clone)]
pub struct ConversionBuffers {
    default: Decimal,
    exceptional: HashMap<CurrencyPair, Decimal>,
}

impl ConversionBuffers {
    pub fn new() -> Self {
        let mut exceptional = HashMap::new();
        exceptional.insert(
            CurrencyPair::new(Currency::AED, Currency::USD),
            Decimal::ZERO,
        );
        exceptional.insert(
            CurrencyPair::new(Currency::USD, Currency::AED),
            Decimal::ZERO,
        );
        Self {
            default: Decimal::new(5, 3),
            exceptional,
        }
    }

    pub fn with_default(default: Decimal) -> Self {
        let mut buffers = Self::new();
        buffers.default = default;
        buffers
    }

    pub fn set_pair(&mut self, pair: CurrencyPair, buffer: Decimal) {
        self.exceptional.insert(pair, buffer);
    }

    pub fn buffer(&self, source: Currency, target: Currency) -> Decimal {
        self.exceptional
            .get(&CurrencyPair::new(source, target))
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for ConversionBuffers {
    fn default() -> Self {
        Self::new()
    }
}
