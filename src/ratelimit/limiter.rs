//! Core rate limiter implementation.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, trace};

use crate::config::LimiterConfig;
use crate::error::{LimitlessError, Result};
use crate::storage::{InMemoryStorage, StorageBackend};

/// Default key prefix, namespacing keys so independently-configured limiters
/// sharing one backend do not collide.
const DEFAULT_KEY_PREFIX: &str = "ratelimit";

/// A sliding-window rate limiter.
///
/// Permits at most `calls` admissions per `per`-second rolling window for
/// each key. A caller over the limit is suspended until the oldest recorded
/// call ages out of the window, then re-checked against live state; there is
/// no rejected outcome and no fairness guarantee among concurrent waiters.
///
/// The limiter is cheap to share: clone the `Arc` around it, or construct
/// several limiters over one shared backend with distinct key prefixes.
pub struct RateLimiter {
    /// Maximum admissions per window
    calls: usize,
    /// Window length in seconds
    per: f64,
    /// Per-key timestamp storage
    storage: Arc<dyn StorageBackend>,
    /// Key namespace prefix
    key_prefix: String,
}

impl RateLimiter {
    /// Create a rate limiter over a fresh in-memory backend.
    pub fn new(calls: u32, per_seconds: f64) -> Result<Self> {
        Self::with_storage(
            calls,
            per_seconds,
            Arc::new(InMemoryStorage::new()),
            DEFAULT_KEY_PREFIX,
        )
    }

    /// Create a rate limiter over an existing backend.
    ///
    /// Fails fast with [`LimitlessError::Config`] on a zero call budget or a
    /// non-positive window; neither is ever reported at call time.
    pub fn with_storage(
        calls: u32,
        per_seconds: f64,
        storage: Arc<dyn StorageBackend>,
        key_prefix: &str,
    ) -> Result<Self> {
        let config = LimiterConfig {
            calls,
            per_seconds,
            key_prefix: key_prefix.to_string(),
        };
        Self::from_config(&config, storage)
    }

    /// Create a rate limiter from a validated configuration.
    pub fn from_config(config: &LimiterConfig, storage: Arc<dyn StorageBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            calls: config.calls as usize,
            per: config.per_seconds,
            storage,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Wait until a call under `identity` is admissible, then record it.
    ///
    /// Each iteration re-reads the clock and the live window state, so a
    /// waiter woken after a sleep re-validates against current truth rather
    /// than the snapshot it slept on. The wait is unbounded; it ends only in
    /// admission or a propagated storage error.
    pub async fn admit(&self, identity: &str) -> Result<()> {
        let key = self.make_key(identity);

        loop {
            let now = epoch_seconds();
            let timestamps = self.storage.cleanup(&key, now, self.per).await?;

            trace!(
                key = %key,
                in_window = timestamps.len(),
                limit = self.calls,
                "Checking window"
            );

            if timestamps.len() < self.calls {
                let mut timestamps = timestamps;
                timestamps.push(epoch_seconds());
                self.storage.set(&key, timestamps).await?;
                trace!(key = %key, "Admitted");
                return Ok(());
            }

            // Window is full: the earliest slot frees up once timestamps[0]
            // ages out. A non-positive wait (clock stepped backward) means
            // no sleep, just re-check.
            let wait = self.per - (now - timestamps[0]);
            if wait > 0.0 {
                debug!(
                    key = %key,
                    wait_secs = wait,
                    "Window full, waiting for oldest slot to expire"
                );
                tokio::time::sleep(Duration::from_secs_f64(wait)).await;
            }
        }
    }

    /// Like [`admit`](Self::admit), but give up after `timeout`.
    ///
    /// On expiry returns [`LimitlessError::DeadlineExceeded`] without
    /// recording an admission.
    pub async fn admit_within(&self, identity: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.admit(identity)).await {
            Ok(result) => result,
            Err(_) => Err(LimitlessError::DeadlineExceeded(timeout)),
        }
    }

    /// Number of calls currently recorded in `identity`'s window.
    ///
    /// Prunes expired timestamps as a side effect, so the count reflects the
    /// window ending now.
    pub async fn current_count(&self, identity: &str) -> Result<usize> {
        let key = self.make_key(identity);
        let timestamps = self
            .storage
            .cleanup(&key, epoch_seconds(), self.per)
            .await?;
        Ok(timestamps.len())
    }

    /// The key prefix this limiter namespaces its identities under.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn make_key(&self, identity: &str) -> String {
        format!("{}:{}", self.key_prefix, identity)
    }
}

/// Current wall-clock time as floating-point epoch seconds.
///
/// Wall-clock on purpose: stored timestamps must be comparable across
/// limiter instances sharing a backend, which `Instant` cannot offer.
/// Backward clock steps shorten or skip waits rather than misbehaving.
fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
