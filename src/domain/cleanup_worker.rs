//! Background deletion of stale short links.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use crate::domain::repositories::{LinkRepository, RepositoryError};

/// Deletes every link created more than `retention` ago.
///
/// Returns the number of removed records.
pub async fn purge_stale_links(
    repository: &dyn LinkRepository,
    retention: chrono::Duration,
) -> Result<u64, RepositoryError> {
    let cutoff = Utc::now() - retention;
    repository.delete_created_before(cutoff).await
}

/// Runs [`purge_stale_links`] every `interval`.
///
/// Failures are logged and the worker keeps running; the next tick retries.
pub async fn run_cleanup_worker(
    repository: Arc<dyn LinkRepository>,
    interval: Duration,
    retention: chrono::Duration,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        info!("Starting cleanup of stale links");

        match purge_stale_links(repository.as_ref(), retention).await {
            Ok(0) => info!("Cleanup completed: no stale links found"),
            Ok(deleted) => info!(deleted, "Cleanup completed"),
            Err(e) => error!("Cleanup failed: {}", e),
        }
    }
}
