//! In-memory backend implementation.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use wanderly_backend::{Backend, BackendResult, CacheBackend};
use wanderly_core::{CacheKey, CacheValue, Raw};

/// In-memory cache backend backed by a [`DashMap`].
///
/// Entries live for the lifetime of the process; there is no capacity
/// bound, no expiration, and no eviction, matching the storage contract of
/// the document-store backends. Suitable for tests and single-process
/// hosts.
///
/// # Examples
///
/// ```
/// use wanderly_memory::InMemoryBackend;
///
/// let backend = InMemoryBackend::new();
/// ```
///
/// # Caveats
///
/// - Data is **not persisted** - the cache is lost on process restart
/// - Data is **not shared** across processes
/// - A concurrent duplicate `write` under one key overwrites rather than
///   duplicates; both payloads are freshly fetched so either is valid
#[derive(Clone, Debug, Default)]
pub struct InMemoryBackend {
    cache: Arc<DashMap<CacheKey, CacheValue<Raw>>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        Ok(self.cache.get(key).map(|v| v.value().clone()))
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.cache.insert(key.clone(), value);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// Explicit CacheBackend implementation using default trait methods
impl CacheBackend for InMemoryBackend {}
