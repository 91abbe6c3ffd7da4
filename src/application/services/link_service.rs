//! Link creation, resolution and management service.

use std::sync::Arc;

use crate::application::services::code_allocator::{Allocation, CodeAllocator};
use crate::domain::entities::{ClickSource, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Service used by HTTP handlers and the admin CLI.
///
/// Normalizes user input before it reaches the [`CodeAllocator`] and maps
/// lookup misses to [`AppError::NotFound`].
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    allocator: CodeAllocator,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, allocator: CodeAllocator) -> Self {
        Self {
            repository,
            allocator,
        }
    }

    /// Normalizes `raw_url` and allocates its short code.
    ///
    /// Repeated calls with equivalent URLs return the same record with
    /// `is_new = false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid.
    /// Returns [`AppError::Internal`] if allocation is exhausted or the store fails.
    pub async fn shorten(&self, raw_url: &str) -> Result<Allocation, AppError> {
        let normalized_url = normalize_url(raw_url)?;
        Ok(self.allocator.allocate(&normalized_url).await?)
    }

    /// Resolves a short code for a redirect and counts the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn resolve(&self, code: &str, source: ClickSource) -> Result<ShortLink, AppError> {
        self.repository
            .record_click(code, source)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Retrieves a link by its short code without touching counters.
    pub async fn get_link(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists links newest first, together with the total number of links.
    pub async fn list_links(&self, limit: i64, offset: i64) -> Result<(Vec<ShortLink>, i64), AppError> {
        let (links, total) = tokio::try_join!(
            self.repository.list(limit, offset),
            self.repository.count()
        )?;
        Ok((links, total))
    }

    /// Counts all links. Doubles as a database liveness probe.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Deletes a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was deleted.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete(code).await? {
            Ok(())
        } else {
            Err(not_found(code))
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}
