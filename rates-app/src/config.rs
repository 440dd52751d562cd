//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub provider_base_url: String,
    pub provider_api_key: String,
    /// Default conversion markup; `None` disables buffering entirely.
    pub conversion_buffer: Option<Decimal>,
    pub overrides_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let provider_base_url = env::var("PROVIDER_BASE_URL")
            .map_err(|_| anyhow::anyhow!("PROVIDER_BASE_URL environment variable is required"))?;

        let provider_api_key = env::var("PROVIDER_API_KEY")
            .map_err(|_| anyhow::anyhow!("PROVIDER_API_KEY environment variable is required"))?;

        let conversion_buffer = match env::var("CONVERSION_BUFFER") {
            Ok(raw) if raw.eq_ignore_ascii_case("off") => None,
            Ok(raw) => Some(
                Decimal::from_str(&raw)
                    .map_err(|_| anyhow::anyhow!("CONVERSION_BUFFER must be a decimal or 'off'"))?,
            ),
            // Unset means the built-in default buffer.
            Err(_) => Some(Decimal::new(5, 3)),
        };

        let overrides_enabled = env::var("RATE_OVERRIDES_ENABLED")
            .map(|raw| raw != "0" && !raw.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            port,
            database_url,
            provider_base_url,
            provider_api_key,
            conversion_buffer,
            overrides_enabled,
        })
    }
}
