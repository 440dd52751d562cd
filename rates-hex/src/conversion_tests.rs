//! Conversion engine tests against a scripted rate source.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use rates_types::{Currency, MoneyAmount, RateSource, ServiceError};

    use crate::buffer::ConversionBuffers;
    use crate::conversion::ConversionService;

    pub struct MockRates {
        response: Result<Decimal, ServiceError>,
        calls: AtomicUsize,
    }

    impl MockRates {
        fn returning(rate: Decimal) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(rate),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(err: ServiceError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(err),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for MockRates {
        async fn rate(
            &self,
            _source: Currency,
            _target: Currency,
        ) -> Result<Decimal, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn unbuffered(rate: Decimal) -> ConversionService<MockRates> {
        ConversionService::new(MockRates::returning(rate), None)
    }

    #[tokio::test]
    async fn test_sanity_filter_drops_non_positive_results() {
        let service = unbuffered(dec!(100));

        let results = service
            .convert_many(
                Currency::USD,
                Currency::EUR,
                &[dec!(100), dec!(-200), dec!(300)],
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.get(&dec!(100)), Some(&dec!(10000)));
        assert_eq!(results.get(&dec!(300)), Some(&dec!(30000)));
        assert!(!results.contains_key(&dec!(-200)));
    }

    #[tokio::test]
    async fn test_rounding_is_half_away_from_zero() {
        let service = unbuffered(dec!(12.345));

        let results = service
            .convert_many(Currency::USD, Currency::AED, &[dec!(1)])
            .await
            .unwrap();

        assert_eq!(results.get(&dec!(1)), Some(&dec!(12.35)));
    }

    #[tokio::test]
    async fn test_default_buffer_inflates_the_rate() {
        let service = ConversionService::new(
            MockRates::returning(dec!(100)),
            Some(ConversionBuffers::new()),
        );

        let results = service
            .convert_many(Currency::USD, Currency::EUR, &[dec!(100)])
            .await
            .unwrap();

        // 100 * 100 * 1.005
        assert_eq!(results.get(&dec!(100)), Some(&dec!(10050.00)));
    }

    #[tokio::test]
    async fn test_pegged_pair_converts_unbuffered() {
        let service = ConversionService::new(
            MockRates::returning(dec!(3.672982)),
            Some(ConversionBuffers::new()),
        );

        let results = service
            .convert_many(Currency::USD, Currency::AED, &[dec!(100)])
            .await
            .unwrap();

        assert_eq!(results.get(&dec!(100)), Some(&dec!(367.30)));
    }

    #[tokio::test]
    async fn test_larger_buffer_never_yields_less() {
        let mut previous = Decimal::ZERO;
        for default in [dec!(0), dec!(0.005), dec!(0.01)] {
            let service = ConversionService::new(
                MockRates::returning(dec!(3.67)),
                Some(ConversionBuffers::with_default(default)),
            );
            let results = service
                .convert_many(Currency::USD, Currency::SAR, &[dec!(100)])
                .await
                .unwrap();
            let converted = results[&dec!(100)];
            assert!(converted >= previous);
            previous = converted;
        }
    }

    #[tokio::test]
    async fn test_identity_conversion_bypasses_everything() {
        let rates = MockRates::returning(dec!(99));
        let service = ConversionService::new(rates.clone(), Some(ConversionBuffers::new()));

        let results = service
            .convert_many(Currency::EUR, Currency::EUR, &[dec!(5), dec!(-7)])
            .await
            .unwrap();

        // Values map to themselves, unrounded and unfiltered.
        assert_eq!(results.get(&dec!(5)), Some(&dec!(5)));
        assert_eq!(results.get(&dec!(-7)), Some(&dec!(-7)));
        assert_eq!(rates.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_values_rejected() {
        let service = unbuffered(dec!(1.5));

        let err = service
            .convert_many(Currency::USD, Currency::EUR, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidArgument(name) if name == "values"));
    }

    #[tokio::test]
    async fn test_duplicate_inputs_collapse() {
        let service = unbuffered(dec!(2));

        let results = service
            .convert_many(Currency::USD, Currency::EUR, &[dec!(100), dec!(100)])
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.get(&dec!(100)), Some(&dec!(200)));
    }

    #[tokio::test]
    async fn test_convert_one_happy_path() {
        let service = unbuffered(dec!(3.672982));

        let converted = service
            .convert_one(Currency::USD, Currency::AED, dec!(100))
            .await
            .unwrap();

        assert_eq!(converted, dec!(367.30));
    }

    #[tokio::test]
    async fn test_convert_one_filtered_result_is_no_quote() {
        let service = unbuffered(dec!(100));

        let err = service
            .convert_one(Currency::USD, Currency::EUR, dec!(-5))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NoQuoteFound(pair) if pair == "USDEUR"));
    }

    #[tokio::test]
    async fn test_rate_failure_propagates_verbatim() {
        let service = ConversionService::new(
            MockRates::failing(ServiceError::NoQuoteFound("USDEUR".to_string())),
            None,
        );

        let err = service
            .convert_many(Currency::USD, Currency::EUR, &[dec!(1)])
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NoQuoteFound(_)));
    }

    #[tokio::test]
    async fn test_tagged_projection_skips_the_buffer() {
        let service = ConversionService::new(
            MockRates::returning(dec!(100)),
            Some(ConversionBuffers::new()),
        );

        let results = service
            .convert_amounts(Currency::USD, Currency::EUR, &[dec!(100)])
            .await
            .unwrap();

        let key = MoneyAmount::new(dec!(100), Currency::USD);
        assert_eq!(
            results.get(&key),
            Some(&MoneyAmount::new(dec!(10000), Currency::EUR))
        );
    }
}
