//! Storage backends for per-key sliding-window state.

mod memory;

pub use memory::InMemoryStorage;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for rate limit storage backends.
///
/// A backend owns the mapping from a rate-limit key to its ordered sequence
/// of call timestamps (epoch seconds, ascending by insertion). The three
/// operations are individually atomic per backend instance: no caller ever
/// observes a torn sequence. Composing them (a `cleanup` followed later by a
/// `set`) is the caller's concern and is not atomic across calls.
///
/// The in-memory backend is infallible in practice; external backends
/// (a key-value store, for example) report outages through
/// [`LimitlessError::StorageUnavailable`](crate::LimitlessError::StorageUnavailable).
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Return a copy of the stored timestamps for `key`, possibly unpruned.
    /// Unseen keys yield an empty sequence. The returned vector never
    /// aliases the backend's internal state.
    async fn get(&self, key: &str) -> Result<Vec<f64>>;

    /// Atomically replace the stored sequence for `key`.
    async fn set(&self, key: &str, timestamps: Vec<f64>) -> Result<()>;

    /// Drop timestamps at or past the window edge, keeping those with
    /// `t > now - window`. Writes the survivors back as the new stored
    /// value and returns them. This is the only operation that shrinks a
    /// key's sequence.
    async fn cleanup(&self, key: &str, now: f64, window: f64) -> Result<Vec<f64>>;
}
