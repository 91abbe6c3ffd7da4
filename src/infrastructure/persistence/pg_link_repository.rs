//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ClickSource, NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};

const COLUMNS: &str = "url_id, original_url, short_code, click_count, qr_click_count, created_at";

#[derive(Debug, FromRow)]
struct ShortLinkRow {
    url_id: i64,
    original_url: String,
    short_code: String,
    click_count: i64,
    qr_click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.url_id,
            row.original_url,
            row.short_code,
            row.click_count,
            row.qr_click_count,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for the `url_info` table.
///
/// Uniqueness of `short_code` and `original_url` is enforced by the
/// `url_info_short_code_key` and `url_info_original_url_key` constraints.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Separates UNIQUE violations from other database failures.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return RepositoryError::UniqueViolation {
            constraint: db_err.constraint().map(str::to_string),
        };
    }

    RepositoryError::Storage(e)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "INSERT INTO url_info (original_url, short_code) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RepositoryError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {COLUMNS} FROM url_info WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {COLUMNS} FROM url_info WHERE original_url = $1"
        ))
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn record_click(
        &self,
        code: &str,
        source: ClickSource,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        let counter = match source {
            ClickSource::Direct => "click_count",
            ClickSource::QrCode => "qr_click_count",
        };

        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "UPDATE url_info SET {counter} = {counter} + 1 WHERE short_code = $1 RETURNING {COLUMNS}"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {COLUMNS} FROM url_info ORDER BY created_at DESC, url_id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_info")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM url_info WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM url_info WHERE created_at < $1")
            .bind(cutoff)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
