//! Idempotent, collision-free short code allocation.
//!
//! The allocator keeps no state of its own. Concurrency safety comes from the
//! store's UNIQUE constraints: "not found, then insert" is always treated as
//! racy, and a uniqueness violation on insert sends the allocator back to
//! re-check instead of failing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};
use crate::utils::code_generator::{CodeGenerator, HashCodeGenerator};

/// Default number of candidate evaluations before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Allocation failures surfaced to callers.
///
/// Uniqueness violations on insert are retried internally. `Storage` wraps
/// whatever the repository reported on any other path.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

/// Outcome of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub link: ShortLink,
    /// `true` if this call inserted the record, `false` if it already existed.
    pub is_new: bool,
}

impl Allocation {
    pub fn short_code(&self) -> &str {
        &self.link.short_code
    }
}

/// Maps normalized URLs to unique short codes.
///
/// # Guarantees
///
/// - **Idempotence**: the same URL always resolves to the same record
/// - **Uniqueness**: two different URLs never share a code at commit time
/// - **Bounded work**: at most `max_attempts` candidates are evaluated
pub struct CodeAllocator {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl CodeAllocator {
    /// Creates an allocator with the SHA-256 generator and the default budget.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            repository,
            generator: Arc::new(HashCodeGenerator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replaces the candidate generator.
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the retry budget. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the short link for `original_url`, creating it if needed.
    ///
    /// `original_url` must already be validated and normalized.
    ///
    /// # Algorithm
    ///
    /// 1. Look up by URL; an existing record is returned as-is
    /// 2. Derive a candidate code from the URL (salt 0)
    /// 3. Look up the candidate: free proceeds, same URL returns it, a
    ///    different URL bumps the salt and retries
    /// 4. Insert; on a uniqueness violation re-check the URL and retry the
    ///    same candidate
    ///
    /// # Errors
    ///
    /// - [`AllocationError::Exhausted`] when every candidate in the budget collided
    /// - [`AllocationError::Storage`] on store failures (not retried)
    pub async fn allocate(&self, original_url: &str) -> Result<Allocation, AllocationError> {
        if let Some(link) = self.find_existing(original_url).await? {
            return Ok(Allocation {
                link,
                is_new: false,
            });
        }

        let mut salt: u32 = 0;

        for _ in 0..self.max_attempts {
            let candidate = self.generator.generate(original_url, salt);

            match self.repository.find_by_code(&candidate).await? {
                Some(link) if link.original_url == original_url => {
                    return Ok(Allocation {
                        link,
                        is_new: false,
                    });
                }
                Some(link) => {
                    debug!(
                        code = %candidate,
                        salt,
                        holder = %link.original_url,
                        "Short code collision"
                    );
                    metrics::counter!("shortli_code_collisions_total").increment(1);
                    salt += 1;
                    continue;
                }
                None => {}
            }

            let new_link = NewShortLink {
                original_url: original_url.to_string(),
                short_code: candidate,
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    metrics::counter!("shortli_links_created_total").increment(1);
                    return Ok(Allocation { link, is_new: true });
                }
                Err(RepositoryError::UniqueViolation { constraint }) => {
                    debug!(?constraint, salt, "Insert lost a race, re-checking");
                    if let Some(link) = self.find_existing(original_url).await? {
                        return Ok(Allocation {
                            link,
                            is_new: false,
                        });
                    }
                }
                Err(e @ RepositoryError::Storage(_)) => return Err(AllocationError::Storage(e)),
            }
        }

        warn!(
            url = %original_url,
            attempts = self.max_attempts,
            "Short code allocation exhausted"
        );
        Err(AllocationError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    async fn find_existing(&self, original_url: &str) -> Result<Option<ShortLink>, AllocationError> {
        Ok(self.repository.find_by_original_url(original_url).await?)
    }
}
