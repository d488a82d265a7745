//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::StoreError;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::utils::db_error::map_insert_error;

const MAPPING_COLUMNS: &str = "id, code, long_url, clicks, created_at, updated_at, deleted_at";

#[derive(Debug, FromRow)]
struct MappingRow {
    id: i64,
    code: String,
    long_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping {
            id: row.id,
            code: row.code,
            long_url: row.long_url,
            clicks: row.clicks,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// PostgreSQL repository for mapping storage.
///
/// Code uniqueness is the `url_mappings_code_key` unique constraint and click
/// counting is a single `UPDATE ... SET clicks = clicks + 1`, so neither
/// depends on application-side locking. Soft-deleted rows are invisible to
/// every lookup.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_code(&self, code: &str) -> Result<Mapping, StoreError> {
        let query = format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings WHERE code = $1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, MappingRow>(&query)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(Mapping::from)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Mapping, StoreError> {
        let query = format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings \
             WHERE long_url = $1 AND deleted_at IS NULL \
             ORDER BY id ASC \
             LIMIT 1"
        );

        sqlx::query_as::<_, MappingRow>(&query)
            .bind(long_url)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(Mapping::from)
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let query = format!(
            "INSERT INTO url_mappings (code, long_url) VALUES ($1, $2) RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, MappingRow>(&query)
            .bind(&new_mapping.code)
            .bind(&new_mapping.long_url)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_insert_error(e, &new_mapping.code))?;

        Ok(row.into())
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET clicks = clicks + 1, updated_at = NOW()
            WHERE code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
