//! PostgreSQL implementation of the alias repository with age-gated removal.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::AliasRecord;
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;

/// Partition every alias row is stored under.
pub const PARTITION: &str = "global";

/// Table used when no prefix is configured.
pub const DEFAULT_TABLE_PREFIX: &str = "url_shortening";

/// Longest identifier PostgreSQL keeps without truncation, minus room for the
/// `_value_idx` index suffix.
const MAX_TABLE_NAME_LENGTH: usize = 53;

/// Age after which a record can no longer be removed, unless configured.
pub fn default_lock_age() -> Duration {
    Duration::hours(12)
}

/// Alias storage in a PostgreSQL table keyed by `(partition_key, row_key)`.
///
/// The table is created on construction if it does not exist. `created_at` is
/// stamped by the database on every insert or replace, and removal compares
/// it against the database clock so the lock age does not depend on the
/// caller's clock.
///
/// Once a record is older than its lock age (see [`Self::with_lock_age`]),
/// [`AliasRepository::remove`] refuses it with [`AppError::RemovalLocked`]: a
/// short link that has been around long enough is assumed to be shared and
/// must not be repointed.
pub struct PgAliasRepository {
    pool: Arc<PgPool>,
    table: String,
    lock_age: Duration,
}

impl PgAliasRepository {
    /// Opens the repository, creating the backing table if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `table_prefix` is not a plain SQL
    /// identifier, and [`AppError::Internal`] if the table cannot be created.
    pub async fn connect(pool: Arc<PgPool>, table_prefix: &str) -> Result<Self, AppError> {
        validate_table_name(table_prefix)?;

        let repository = Self {
            pool,
            table: table_prefix.to_ascii_lowercase(),
            lock_age: default_lock_age(),
        };
        repository.ensure_table().await?;

        tracing::info!(table = %repository.table, "Alias table ready");
        Ok(repository)
    }

    /// Sets the age after which records can no longer be removed.
    pub fn with_lock_age(mut self, lock_age: Duration) -> Self {
        self.lock_age = lock_age;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    async fn ensure_table(&self) -> Result<(), AppError> {
        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                partition_key TEXT NOT NULL,
                row_key TEXT NOT NULL,
                value TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (partition_key, row_key)
            )
            "#,
            table = self.table
        );
        sqlx::query(&create_table)
            .execute(self.pool.as_ref())
            .await?;

        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_value_idx ON {table} (partition_key, value)",
            table = self.table
        );
        sqlx::query(&create_index)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    /// Loads the full record for `key`, including its write timestamp.
    pub async fn find_record(&self, key: &str) -> Result<Option<AliasRecord>, AppError> {
        let sql = format!(
            "SELECT row_key, value, created_at FROM {} WHERE partition_key = $1 AND row_key = $2",
            self.table
        );
        let row: Option<(String, String, DateTime<Utc>)> = sqlx::query_as(&sql)
            .bind(PARTITION)
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|(key, value, created_at)| AliasRecord::new(key, value, created_at)))
    }

    /// Loads the record for `key` together with the database clock.
    async fn find_record_with_db_now(
        &self,
        key: &str,
    ) -> Result<Option<(AliasRecord, DateTime<Utc>)>, AppError> {
        let sql = format!(
            "SELECT row_key, value, created_at, now() FROM {} WHERE partition_key = $1 AND row_key = $2",
            self.table
        );
        let row: Option<(String, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(&sql)
            .bind(PARTITION)
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|(key, value, created_at, now)| {
            (AliasRecord::new(key, value, created_at), now)
        }))
    }

    async fn find_key_for_value(&self, value: &str) -> Result<Option<String>, AppError> {
        let sql = format!(
            r#"
            SELECT row_key FROM {}
            WHERE partition_key = $1 AND value = $2
            ORDER BY row_key COLLATE "C"
            LIMIT 1
            "#,
            self.table
        );
        let key: Option<String> = sqlx::query_scalar(&sql)
            .bind(PARTITION)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(key)
    }
}

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn add(&self, key: &str, value: &str) -> Result<(), AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (partition_key, row_key, value, created_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (partition_key, row_key)
            DO UPDATE SET value = EXCLUDED.value, created_at = EXCLUDED.created_at
            "#,
            self.table
        );
        sqlx::query(&sql)
            .bind(PARTITION)
            .bind(key)
            .bind(value)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let Some((record, now)) = self.find_record_with_db_now(key).await? else {
            return Ok(false);
        };

        if record.is_locked(now, self.lock_age) {
            let age = record.age(now);
            tracing::warn!(
                key,
                age_seconds = age.num_seconds(),
                lock_age_seconds = self.lock_age.num_seconds(),
                "Refusing to remove locked alias"
            );
            return Err(AppError::removal_locked(
                "Cannot change a short URL that is too old.",
                json!({
                    "key": key,
                    "age_seconds": age.num_seconds(),
                    "lock_age_seconds": self.lock_age.num_seconds(),
                }),
            ));
        }

        let sql = format!(
            "DELETE FROM {} WHERE partition_key = $1 AND row_key = $2",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(PARTITION)
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains_key(&self, key: &str) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE partition_key = $1 AND row_key = $2)",
            self.table
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(PARTITION)
            .bind(key)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn contains_value(&self, value: &str) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE partition_key = $1 AND value = $2)",
            self.table
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(PARTITION)
            .bind(value)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn get_key(&self, value: &str) -> Result<String, AppError> {
        self.find_key_for_value(value)
            .await?
            .ok_or_else(|| AppError::not_found("No alias for target", json!({ "value": value })))
    }

    async fn get_value(&self, key: &str) -> Result<String, AppError> {
        self.find_record(key)
            .await?
            .map(|record| record.value)
            .ok_or_else(|| AppError::not_found("Alias not found", json!({ "key": key })))
    }
}

/// Checks that `name` can be spliced into SQL as an unquoted identifier.
fn validate_table_name(name: &str) -> Result<(), AppError> {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !starts_well || !rest_ok || name.len() > MAX_TABLE_NAME_LENGTH {
        return Err(AppError::bad_request(
            "Table prefix must be a plain SQL identifier",
            json!({ "table_prefix": name, "max_length": MAX_TABLE_NAME_LENGTH }),
        ));
    }

    Ok(())
}
