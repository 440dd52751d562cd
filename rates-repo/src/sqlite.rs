//! SQLite store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use rates_types::{Currency, NewCurrencyRate, RateStore, RepoError};

use crate::types::{encode_timestamp, parse_decimal};

/// SQLite store implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_rate_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RateStore for SqliteRepo {
    async fn latest_rate(
        &self,
        source: Currency,
        target: Currency,
        now: DateTime<Utc>,
    ) -> Result<Option<Decimal>, RepoError> {
        let row: Option<String> = sqlx::query_scalar(
            r#"SELECT rate FROM currency_rates
               WHERE source = ? AND target = ? AND valid_from <= ?
               ORDER BY valid_from DESC
               LIMIT 1"#,
        )
        .bind(source.code())
        .bind(target.code())
        .bind(encode_timestamp(now))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.as_deref().map(parse_decimal).transpose()
    }

    async fn override_rate(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Option<Decimal>, RepoError> {
        let row: Option<String> = sqlx::query_scalar(
            r#"SELECT rate FROM default_currency_rates
               WHERE source = ? AND target = ?
               ORDER BY valid_from DESC
               LIMIT 1"#,
        )
        .bind(source)
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.as_deref().map(parse_decimal).transpose()
    }

    async fn add_override_rate(
        &self,
        source: &str,
        target: &str,
        rate: Decimal,
        valid_from: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO default_currency_rates (source, target, rate, valid_from)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(source)
        .bind(target)
        .bind(rate.to_string())
        .bind(encode_timestamp(valid_from))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn record_rates(&self, rates: Vec<NewCurrencyRate>) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        for rate in rates {
            sqlx::query(
                r#"INSERT INTO currency_rates (source, target, rate, rate_correction, valid_from)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(&rate.source)
            .bind(&rate.target)
            .bind(rate.rate.to_string())
            .bind(rate.rate_correction.to_string())
            .bind(encode_timestamp(rate.valid_from))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}
