//! HTTP request handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use rates_types::{Currency, RateSource, ServiceError};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<S: RateSource> {
    pub rates: Arc<S>,
    pub conversions: ConversionService<S>,
}

/// Wrapper to implement IntoResponse for ServiceError (orphan rule workaround).
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            // Store faults and malformed payloads stay opaque to clients.
            ServiceError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            other => (StatusCode::BAD_REQUEST, other.to_string()),
        };

        let body = serde_json::json!({
            "detail": detail,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn parse_currency(raw: &str, name: &str) -> Result<Currency, ApiError> {
    if raw.trim().is_empty() {
        return Err(ApiError(ServiceError::InvalidArgument(name.to_string())));
    }
    Currency::from_str(raw).map_err(ApiError)
}

/// Current rate for a currency pair.
#[tracing::instrument(skip(state))]
pub async fn get_rate<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Path((source, target)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let source = parse_currency(&source, "sourceCurrency")?;
    let target = parse_currency(&target, "targetCurrency")?;

    let rate = state.rates.rate(source, target).await?;
    Ok(Json(rate))
}

/// Convert a single amount.
#[tracing::instrument(skip(state))]
pub async fn convert_one<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Path((source, target, value)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let source = parse_currency(&source, "sourceCurrency")?;
    let target = parse_currency(&target, "targetCurrency")?;
    let value = Decimal::from_str(&value)
        .map_err(|_| ApiError(ServiceError::InvalidArgument("value".to_string())))?;

    let converted = state.conversions.convert_one(source, target, value).await?;
    Ok(Json(converted))
}

/// Convert a batch of amounts passed as repeated `values` parameters.
///
/// serde_urlencoded cannot deserialize repeated keys into a struct
/// field, so the raw pair list is taken and filtered by hand.
#[tracing::instrument(skip(state, params))]
pub async fn convert_many<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Path((source, target)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let source = parse_currency(&source, "sourceCurrency")?;
    let target = parse_currency(&target, "targetCurrency")?;

    let mut values = Vec::new();
    for (key, raw) in params {
        if key != "values" {
            continue;
        }
        let value = Decimal::from_str(&raw)
            .map_err(|_| ApiError(ServiceError::InvalidArgument("values".to_string())))?;
        values.push(value);
    }

    let results = state
        .conversions
        .convert_many(source, target, &values)
        .await?;
    Ok(Json(results))
}
