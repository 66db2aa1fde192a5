//! In-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::StorageBackend;
use crate::error::Result;

/// Process-local storage backend.
///
/// One mutex guards the whole map, serializing `get`, `set`, and `cleanup`
/// against each other. Key records are created lazily on first `set` and
/// live until the backend is dropped; only `cleanup` shrinks them.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: Mutex<HashMap<String, Vec<f64>>>,
}

impl InMemoryStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with a stored record.
    pub fn key_count(&self) -> usize {
        self.data.lock().len()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Vec<f64>> {
        let data = self.data.lock();
        Ok(data.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, timestamps: Vec<f64>) -> Result<()> {
        let mut data = self.data.lock();
        data.insert(key.to_string(), timestamps);
        Ok(())
    }

    async fn cleanup(&self, key: &str, now: f64, window: f64) -> Result<Vec<f64>> {
        // Single lock acquisition for the read-filter-write, so concurrent
        // cleanups of the same key cannot interleave.
        let mut data = self.data.lock();
        let valid: Vec<f64> = data
            .get(key)
            .map(|timestamps| {
                timestamps
                    .iter()
                    .copied()
                    .filter(|&t| t > now - window)
                    .collect()
            })
            .unwrap_or_default();
        data.insert(key.to_string(), valid.clone());
        Ok(valid)
    }
}
