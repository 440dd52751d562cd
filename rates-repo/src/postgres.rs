//! PostgreSQL store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use rates_types::{Currency, NewCurrencyRate, RateStore, RepoError};

/// PostgreSQL store implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_rate_tables_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RateStore for PostgresRepo {
    async fn latest_rate(
        &self,
        source: Currency,
        target: Currency,
        now: DateTime<Utc>,
    ) -> Result<Option<Decimal>, RepoError> {
        sqlx::query_scalar(
            r#"SELECT rate FROM currency_rates
               WHERE source = $1 AND target = $2 AND valid_from <= $3
               ORDER BY valid_from DESC
               LIMIT 1"#,
        )
        .bind(source.code())
        .bind(target.code())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn override_rate(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Option<Decimal>, RepoError> {
        sqlx::query_scalar(
            r#"SELECT rate FROM default_currency_rates
               WHERE source = $1 AND target = $2
               ORDER BY valid_from DESC
               LIMIT 1"#,
        )
        .bind(source)
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))
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
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(source)
        .bind(target)
        .bind(rate)
        .bind(valid_from)
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
                   VALUES ($1, $2, $3, $4, $5)"#,
            )
            .bind(&rate.source)
            .bind(&rate.target)
            .bind(rate.rate)
            .bind(rate.rate_correction)
            .bind(rate.valid_from)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}
