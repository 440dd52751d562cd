//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use rates_types::RateSource;

use super::handlers::{self, AppState};
use crate::ConversionService;

/// HTTP Server for the rates API.
pub struct HttpServer<S: RateSource> {
    state: Arc<AppState<S>>,
}

impl<S: RateSource> HttpServer<S> {
    /// Creates a new HTTP server around a rate source and its
    /// conversion service.
    pub fn new(rates: Arc<S>, conversions: ConversionService<S>) -> Self {
        Self {
            state: Arc::new(AppState { rates, conversions }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/rates/{source}/{target}", get(handlers::get_rate::<S>))
            .route(
                "/api/conversions/{source}/{target}/{value}",
                get(handlers::convert_one::<S>),
            )
            .route(
                "/api/conversions/{source}/{target}",
                get(handlers::convert_many::<S>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
