//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the store adapter and the live-rates client
//! - Create the resolver and conversion service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_hex::{ConversionBuffers, ConversionService, RateResolver, ResolverOptions, inbound::HttpServer};
use rates_provider::CurrencyLayerClient;
use rates_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting rates server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build the store (handles connection and migration)
    let store = Arc::new(build_repo(&config.database_url).await?);

    // Live-rates client
    let provider = Arc::new(CurrencyLayerClient::new(
        &config.provider_base_url,
        &config.provider_api_key,
    ));

    // Resolver and conversion service
    let options = ResolverOptions {
        use_overrides: config.overrides_enabled,
    };
    let resolver = Arc::new(RateResolver::new(store, provider, options));
    let buffers = config.conversion_buffer.map(ConversionBuffers::with_default);
    let conversions = ConversionService::new(resolver.clone(), buffers);

    // Create and run the HTTP server
    let server = HttpServer::new(resolver, conversions);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
