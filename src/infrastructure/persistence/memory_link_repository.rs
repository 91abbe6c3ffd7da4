//! Process-local link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{ClickSource, NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};

pub const SHORT_CODE_CONSTRAINT: &str = "url_info_short_code_key";
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_info_original_url_key";

#[derive(Default)]
struct Store {
    next_id: i64,
    by_code: HashMap<String, ShortLink>,
    code_by_url: HashMap<String, String>,
}

/// In-memory [`LinkRepository`] with the same uniqueness rules as `url_info`.
///
/// Used by the HTTP test-suite and by deployments that don't need durability.
/// Both UNIQUE checks and the write happen under one lock.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    store: Mutex<Store>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError> {
        let mut store = self.lock();

        if store.by_code.contains_key(&new_link.short_code) {
            return Err(RepositoryError::UniqueViolation {
                constraint: Some(SHORT_CODE_CONSTRAINT.to_string()),
            });
        }
        if store.code_by_url.contains_key(&new_link.original_url) {
            return Err(RepositoryError::UniqueViolation {
                constraint: Some(ORIGINAL_URL_CONSTRAINT.to_string()),
            });
        }

        store.next_id += 1;
        let link = ShortLink::new(
            store.next_id,
            new_link.original_url,
            new_link.short_code,
            0,
            0,
            Utc::now(),
        );
        store
            .code_by_url
            .insert(link.original_url.clone(), link.short_code.clone());
        store.by_code.insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, RepositoryError> {
        Ok(self.lock().by_code.get(code).cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        let store = self.lock();
        Ok(store
            .code_by_url
            .get(original_url)
            .and_then(|code| store.by_code.get(code))
            .cloned())
    }

    async fn record_click(
        &self,
        code: &str,
        source: ClickSource,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        let mut store = self.lock();
        let Some(link) = store.by_code.get_mut(code) else {
            return Ok(None);
        };

        match source {
            ClickSource::Direct => link.click_count += 1,
            ClickSource::QrCode => link.qr_click_count += 1,
        }

        Ok(Some(link.clone()))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, RepositoryError> {
        let store = self.lock();
        let mut links: Vec<ShortLink> = store.by_code.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.lock().by_code.len() as i64)
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        let mut store = self.lock();
        match store.by_code.remove(code) {
            Some(link) => {
                store.code_by_url.remove(&link.original_url);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut store = self.lock();
        let stale: Vec<ShortLink> = store
            .by_code
            .values()
            .filter(|link| link.created_at < cutoff)
            .cloned()
            .collect();

        for link in &stale {
            store.by_code.remove(&link.short_code);
            store.code_by_url.remove(&link.original_url);
        }

        Ok(stale.len() as u64)
    }
}
