//! Encoding helpers shared by the adapters.

use rates_types::RepoError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fixed-width UTC timestamp for SQLite storage.
///
/// Micro-second RFC 3339 with a `Z` suffix: every value has the same
/// width, so lexicographic comparison in SQL equals chronological
/// comparison.
pub fn encode_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Parses a TEXT-encoded decimal column.
pub fn parse_decimal(s: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(s).map_err(|e| RepoError::Database(format!("bad decimal '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_timestamps_sort_chronologically() {
        use chrono::{TimeZone, Utc};

        let early = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let late = early + chrono::Duration::nanoseconds(1_500);

        let a = encode_timestamp(early);
        let b = encode_timestamp(late);
        assert!(a < b);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("3.672982").is_ok());
        assert!(parse_decimal("not-a-rate").is_err());
    }
}
