//! # Rates Provider
//!
//! A typed reqwest client for the live FX-rates feed.
//!
//! The feed returns every quote relative to a source currency in one
//! call, as a flat `"USDAED" -> 3.67` map. Transient failures are
//! retried here with exponential backoff; the resolver above never
//! retries.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::warn;

use rates_types::{Currency, LiveRateProvider, ServiceError};

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 500;
const JITTER_MAX_MS: u64 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire shape of the provider's `live` endpoint.
#[derive(Debug, Deserialize)]
struct LiveRatesResponse {
    success: bool,
    #[serde(default)]
    quotes: HashMap<String, Decimal>,
    error: Option<ProviderFault>,
}

#[derive(Debug, Deserialize)]
struct ProviderFault {
    #[allow(dead_code)]
    code: i32,
    info: String,
}

/// Client for a currencylayer-style live-rates API.
pub struct CurrencyLayerClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl CurrencyLayerClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        }
    }

    fn live_url(&self, source: Currency) -> String {
        format!(
            "{}/live?access_key={}&source={}&currencies={}",
            self.base_url,
            self.api_key,
            source,
            supported_currencies_param(source)
        )
    }

    /// Performs the request with up to [`MAX_ATTEMPTS`] tries on
    /// transport errors and 5xx responses. 4xx responses are final.
    async fn fetch_live(&self, source: Currency) -> Result<LiveRatesResponse, ServiceError> {
        let url = self.live_url(source);
        let mut attempt = 0;

        let response = loop {
            attempt += 1;
            match self.http.get(&url).send().await {
                Ok(response) if response.status().is_success() => break response,
                Ok(response) => {
                    let status = response.status();
                    if attempt >= MAX_ATTEMPTS || !status.is_server_error() {
                        return Err(ServiceError::NetworkError {
                            status: Some(status.as_u16()),
                            details: format!(
                                "{} {}",
                                status.as_u16(),
                                status.canonical_reason().unwrap_or("unknown status")
                            ),
                        });
                    }
                    warn!(%source, attempt, status = status.as_u16(), "rate request failed, retrying");
                }
                Err(err) => {
                    if attempt >= MAX_ATTEMPTS {
                        return Err(ServiceError::NetworkError {
                            status: err.status().map(|s| s.as_u16()),
                            details: err.to_string(),
                        });
                    }
                    warn!(%source, attempt, error = %err, "rate request failed, retrying");
                }
            }
            sleep(backoff_delay(attempt)).await;
        };

        // A 2xx body that is not the documented contract is an
        // unexpected fault, not a client error.
        response
            .json::<LiveRatesResponse>()
            .await
            .map_err(|err| ServiceError::Internal(format!("malformed provider payload: {err}")))
    }
}

#[async_trait::async_trait]
impl LiveRateProvider for CurrencyLayerClient {
    async fn live_rates(
        &self,
        source: Currency,
    ) -> Result<HashMap<String, Decimal>, ServiceError> {
        let payload = self.fetch_live(source).await?;

        if payload.success {
            Ok(payload.quotes)
        } else {
            let info = payload
                .error
                .map(|f| f.info)
                .unwrap_or_else(|| "provider reported failure without details".to_string());
            Err(ServiceError::ProviderError(info))
        }
    }
}

/// Every supported currency except the source, comma-joined.
fn supported_currencies_param(source: Currency) -> String {
    Currency::all()
        .iter()
        .filter(|c| **c != source)
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(",")
}

/// 500ms doubled per attempt, plus up to 100ms of jitter.
fn backoff_delay(attempt: u32) -> Duration {
    let base = BACKOFF_BASE_MS * 2u64.pow(attempt.saturating_sub(1));
    let jitter = rand::rng().random_range(0..JITTER_MAX_MS);
    Duration::from_millis(base + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_successful_response_parses() {
        let body = r#"{
            "success": true,
            "quotes": {"USDAED": 3.672982, "USDEUR": 0.92, "USDSAR": 3.75}
        }"#;

        let parsed: LiveRatesResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.quotes.get("USDAED"), Some(&dec!(3.672982)));
        assert_eq!(parsed.quotes.len(), 3);
    }

    #[test]
    fn test_failed_response_parses_error() {
        let body = r#"{
            "success": false,
            "error": {"code": 104, "info": "monthly usage limit reached"}
        }"#;

        let parsed: LiveRatesResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert!(parsed.quotes.is_empty());
        assert_eq!(parsed.error.unwrap().info, "monthly usage limit reached");
    }

    #[test]
    fn test_supported_currencies_excludes_source() {
        let param = supported_currencies_param(Currency::USD);
        assert_eq!(param, "EUR,AED,SAR");
    }

    #[test]
    fn test_live_url_shape() {
        let client = CurrencyLayerClient::new("https://api.example.com/", "secret");
        let url = client.live_url(Currency::EUR);
        assert_eq!(
            url,
            "https://api.example.com/live?access_key=secret&source=EUR&currencies=USD,AED,SAR"
        );
    }

    #[test]
    fn test_backoff_grows_per_attempt() {
        let first = backoff_delay(1);
        let second = backoff_delay(2);
        assert!(first >= Duration::from_millis(500));
        assert!(first < Duration::from_millis(600));
        assert!(second >= Duration::from_millis(1000));
        assert!(second < Duration::from_millis(1100));
    }
}
