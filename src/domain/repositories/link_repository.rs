//! Repository trait for short link data access.

use crate::domain::entities::{ClickSource, NewShortLink, ShortLink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors surfaced by link storage.
///
/// A lookup miss is not an error: finders return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// An insert hit a UNIQUE constraint (short code or original URL).
    ///
    /// Transient from the allocator's point of view; it drives the retry path.
    #[error("unique constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Repository interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// `insert` must check uniqueness atomically with the write; the allocator's
/// optimistic retry relies on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniqueViolation`] if the short code or the
    /// original URL is already stored.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError>;

    /// Finds a record by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RepositoryError>;

    /// Finds a record by its normalized original URL.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortLink>, RepositoryError>;

    /// Atomically increments the counter selected by `source`.
    ///
    /// Returns the updated record, or `Ok(None)` if the code is unknown.
    async fn record_click(
        &self,
        code: &str,
        source: ClickSource,
    ) -> Result<Option<ShortLink>, RepositoryError>;

    /// Lists records, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, RepositoryError>;

    /// Counts all records.
    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Deletes a record by code. Returns `Ok(false)` if nothing matched.
    async fn delete(&self, code: &str) -> Result<bool, RepositoryError>;

    /// Deletes every record created before `cutoff` and returns how many were removed.
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
