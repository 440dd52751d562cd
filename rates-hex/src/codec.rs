//! Currency-pair codec for the provider's flat quote format.
//!
//! The live feed keys quotes by a 6-character token: the first three
//! characters are the source code, the last three the target
//! ("USDAED"). Codes are not validated here; unknown codes flow
//! through as raw strings and simply never match a typed lookup.

use rust_decimal::Decimal;
use std::collections::HashMap;

use rates_types::ServiceError;

const SYMBOL_LENGTH: usize = 3;

/// Splits a flat quotes map into (source, target) keyed pairs.
///
/// Fails with `InvalidArgument("rates")` on an empty map. Tokens that
/// are not exactly six characters are skipped rather than guessed at.
pub fn split_quotes(
    quotes: &HashMap<String, Decimal>,
) -> Result<HashMap<(String, String), Decimal>, ServiceError> {
    if quotes.is_empty() {
        return Err(ServiceError::InvalidArgument("rates".to_string()));
    }

    let mut pairs = HashMap::with_capacity(quotes.len());
    for (token, rate) in quotes {
        let (Some(source), Some(target)) =
            (token.get(..SYMBOL_LENGTH), token.get(SYMBOL_LENGTH..))
        else {
            continue;
        };
        if target.len() != SYMBOL_LENGTH {
            continue;
        }
        pairs.insert((source.to_string(), target.to_string()), *rate);
    }

    Ok(pairs)
}

/// Inverse of [`split_quotes`] for a single pair.
pub fn join_pair(source: &str, target: &str) -> String {
    format!("{source}{target}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_basic() {
        let mut quotes = HashMap::new();
        quotes.insert("USDAED".to_string(), dec!(3.672982));
        quotes.insert("USDEUR".to_string(), dec!(0.92));

        let pairs = split_quotes(&quotes).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs.get(&("USD".to_string(), "AED".to_string())),
            Some(&dec!(3.672982))
        );
        assert_eq!(
            pairs.get(&("USD".to_string(), "EUR".to_string())),
            Some(&dec!(0.92))
        );
    }

    #[test]
    fn test_split_empty_input_fails() {
        let err = split_quotes(&HashMap::new()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(name) if name == "rates"));
    }

    #[test]
    fn test_split_skips_malformed_tokens() {
        let mut quotes = HashMap::new();
        quotes.insert("USDAED".to_string(), dec!(3.67));
        quotes.insert("USD".to_string(), dec!(1));
        quotes.insert("USDAEDX".to_string(), dec!(2));

        let pairs = split_quotes(&quotes).unwrap();

        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains_key(&("USD".to_string(), "AED".to_string())));
    }

    #[test]
    fn test_split_does_not_validate_codes() {
        let mut quotes = HashMap::new();
        quotes.insert("XXXYYY".to_string(), dec!(7));

        let pairs = split_quotes(&quotes).unwrap();

        assert_eq!(
            pairs.get(&("XXX".to_string(), "YYY".to_string())),
            Some(&dec!(7))
        );
    }

    #[test]
    fn test_split_join_round_trip() {
        let mut quotes = HashMap::new();
        quotes.insert("USDAED".to_string(), dec!(3.67));
        quotes.insert("EURSAR".to_string(), dec!(4.08));

        let pairs = split_quotes(&quotes).unwrap();
        let rejoined: HashMap<String, Decimal> = pairs
            .iter()
            .map(|((source, target), rate)| (join_pair(source, target), *rate))
            .collect();

        assert_eq!(rejoined, quotes);
    }
}
