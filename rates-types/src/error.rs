//! Error types for the currency-rates service.

/// Failures surfaced by the rate resolution and conversion pipeline.
///
/// Everything except `Internal` is a client-visible 400; `Internal`
/// covers store faults and malformed provider payloads, which the
/// transport layer renders as a generic 500.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Argument is null or empty: '{0}'")]
    InvalidArgument(String),

    #[error("Network error on a rate service request: {details}")]
    NetworkError {
        /// Upstream HTTP status, when one was received.
        status: Option<u16>,
        details: String,
    },

    #[error("Rate service exception: {0}")]
    ProviderError(String),

    #[error("No quote found for the currency pair '{0}'")]
    NoQuoteFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => ServiceError::Internal(e),
        }
    }
}
