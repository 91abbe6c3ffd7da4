//! Per-client sliding-window admission control.
//!
//! Each client key keeps the timestamps of its admitted requests inside the
//! current window. A request is admitted while fewer than `limit` timestamps
//! survive pruning; rejected requests are never recorded, so a client can hold
//! at most `limit` timestamps at any time.
//!
//! Unlike a fixed-bucket counter there is no boundary double burst: any
//! `window`-long interval contains at most `limit` admissions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

/// Invalid gate parameters, reported at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionConfigError {
    #[error("rate limit must be greater than 0")]
    ZeroLimit,

    #[error("rate limit window must be greater than 0")]
    ZeroWindow,
}

/// Sliding-window rate limiter keyed by client identity.
///
/// One mutex guards the whole map; every [`admit`](Self::admit) call runs its
/// prune-count-append sequence as a single critical section.
#[derive(Debug)]
pub struct AdmissionGate {
    limit: usize,
    window: Duration,
    requests_by_client: Mutex<HashMap<String, Vec<Instant>>>,
}

impl AdmissionGate {
    /// Creates a gate admitting at most `limit` requests per `window` per client.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionConfigError`] if `limit` or `window` is zero.
    pub fn new(limit: usize, window: Duration) -> Result<Self, AdmissionConfigError> {
        if limit == 0 {
            return Err(AdmissionConfigError::ZeroLimit);
        }
        if window.is_zero() {
            return Err(AdmissionConfigError::ZeroWindow);
        }

        Ok(Self {
            limit,
            window,
            requests_by_client: Mutex::new(HashMap::new()),
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decides whether a request from `client_key` arriving at `now` is admitted.
    ///
    /// Expired timestamps (older than `now - window`) are pruned on every call,
    /// admitted or not. Only admitted requests are recorded.
    pub fn admit(&self, client_key: &str, now: Instant) -> bool {
        let mut requests = self.lock();

        let timestamps = requests.entry(client_key.to_owned()).or_default();
        prune(timestamps, now, self.window);

        if timestamps.len() < self.limit {
            timestamps.push(now);
            true
        } else {
            false
        }
    }

    /// Drops clients whose timestamps have all expired.
    ///
    /// Returns the number of evicted client keys.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut requests = self.lock();
        let before = requests.len();

        requests.retain(|_, timestamps| {
            prune(timestamps, now, self.window);
            !timestamps.is_empty()
        });

        before - requests.len()
    }

    /// Number of client keys currently held in memory.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    /// Number of timestamps recorded for `client_key` as of its last prune.
    pub fn recorded(&self, client_key: &str) -> usize {
        self.lock().get(client_key).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Instant>>> {
        // The map stays consistent even if a holder panicked mid-call.
        self.requests_by_client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps only timestamps at most `window` old relative to `now`.
///
/// Timestamps later than `now` (callers racing to the lock) are kept.
fn prune(timestamps: &mut Vec<Instant>, now: Instant, window: Duration) {
    timestamps.retain(|&t| now.saturating_duration_since(t) <= window);
}

/// Periodically evicts idle clients from the gate.
///
/// Runs until the task is aborted or the runtime shuts down.
pub async fn run_admission_sweeper(gate: Arc<AdmissionGate>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let evicted = gate.sweep(Instant::now());
        if evicted > 0 {
            debug!(
                evicted,
                remaining = gate.tracked_clients(),
                "Evicted idle rate limit entries"
            );
        }
    }
}
