//! Supported currencies and ordered currency pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ServiceError;

/// Currencies supported by the rate service.
///
/// A closed set: anything else is rejected at the parse boundary,
/// so the core never carries an "unspecified" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    AED,
    SAR,
}

impl Currency {
    /// Returns the number of decimal places conversions round to.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD | Currency::EUR | Currency::AED | Currency::SAR => 2,
        }
    }

    /// Three-letter ISO code, as used by the provider and the store.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
        }
    }

    pub fn all() -> &'static [Currency] {
        &[Currency::USD, Currency::EUR, Currency::AED, Currency::SAR]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "AED" => Ok(Currency::AED),
            "SAR" => Ok(Currency::SAR),
            _ => Err(ServiceError::InvalidArgument(format!(
                "unsupported currency '{}'",
                s
            ))),
        }
    }
}

/// An ordered (source, target) currency tuple.
///
/// Order matters: (USD, AED) and (AED, USD) are distinct pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub source: Currency,
    pub target: Currency,
}

impl CurrencyPair {
    pub fn new(source: Currency, target: Currency) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for CurrencyPair {
    /// Renders the provider's flat 6-character form, e.g. "USDAED".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("aed".parse::<Currency>().unwrap(), Currency::AED);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let err = "XXX".parse::<Currency>().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::SAR.to_string(), "SAR");
    }

    #[test]
    fn test_pair_display_is_flat() {
        let pair = CurrencyPair::new(Currency::USD, Currency::AED);
        assert_eq!(pair.to_string(), "USDAED");
    }

    #[test]
    fn test_all_currencies() {
        assert_eq!(Currency::all().len(), 4);
        assert!(Currency::all().iter().all(|c| c.decimal_places() == 2));
    }
}
