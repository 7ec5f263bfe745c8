//! Read-through fetcher over a cache backend.

use std::sync::Arc;
use std::time::Instant;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use wanderly_backend::CacheBackend;
use wanderly_core::{CacheKey, CacheValue, Upstream};

use crate::concurrency::{ConcurrencyDecision, ConcurrencyManager, NoopConcurrencyManager};
use crate::context::{CacheContext, Fetched};
use crate::metrics::{record_fetch_metrics, record_upstream_duration};
use crate::offload::OffloadManager;

/// Read-through cache over a storage backend.
///
/// One fetch runs the per-request state machine:
///
/// 1. **CheckCache** - look the key up. Hit: return the cached payload.
///    Miss or lookup error (absorbed, logged): continue.
/// 2. **FetchUpstream** - call the provider with the original request.
///    Failure: propagate the provider's error, terminal.
/// 3. **PersistAndReturn** - return the fresh payload immediately; the
///    cache write runs as a detached task whose failure is logged and
///    dropped.
///
/// Per miss: exactly one upstream call and exactly one best-effort
/// persistence attempt. Per hit: zero upstream calls. There is no retry
/// policy at this layer; provider-level fallbacks (the plan generator's
/// alternate model) live in the provider itself.
///
/// The backend is shared behind [`Arc`], so one `ReadThroughCache` serves
/// every lookup kind; the key's prefix routes entries to their collection.
///
/// # Example
///
/// ```rust,ignore
/// let cache = ReadThroughCache::new(backend);
/// let fetched = cache.fetch(key, "Lahore".to_owned(), &geocoder).await?;
/// if fetched.is_hit() {
///     // served without an upstream call
/// }
/// ```
pub struct ReadThroughCache<B, C = NoopConcurrencyManager> {
    backend: Arc<B>,
    offload: OffloadManager,
    concurrency: C,
}

impl<B> ReadThroughCache<B, NoopConcurrencyManager> {
    /// Creates a fetcher over the given backend with default settings:
    /// a fresh [`OffloadManager`] and no duplicate-miss coordination.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            offload: OffloadManager::new(),
            concurrency: NoopConcurrencyManager,
        }
    }
}

impl<B, C> ReadThroughCache<B, C> {
    /// Replaces the offload manager (e.g. to share one across fetchers).
    pub fn offload(mut self, offload: OffloadManager) -> Self {
        self.offload = offload;
        self
    }

    /// Replaces the duplicate-miss coordination strategy.
    pub fn concurrency_manager<NewC>(self, concurrency: NewC) -> ReadThroughCache<B, NewC> {
        ReadThroughCache {
            backend: self.backend,
            offload: self.offload,
            concurrency,
        }
    }

    /// The offload manager tracking detached cache writes.
    ///
    /// Tests await [`OffloadManager::wait_all`] on this before asserting
    /// on persisted state.
    pub fn offload_manager(&self) -> &OffloadManager {
        &self.offload
    }

    /// The shared storage backend.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }
}

impl<B, C> ReadThroughCache<B, C>
where
    B: CacheBackend + Send + Sync + 'static,
{
    /// Fetch the payload for `key`, reading through the cache.
    ///
    /// On success the payload is annotated with its source; the only error
    /// is the upstream provider's own, surfaced unchanged. Backend
    /// failures never reach the caller: a failed lookup degrades to a
    /// miss and a failed write is logged by the detached persistence task.
    pub async fn fetch<Req, U>(
        &self,
        key: CacheKey,
        request: Req,
        upstream: &U,
    ) -> Result<Fetched<U::Response>, U::Error>
    where
        Req: Send,
        U: Upstream<Req>,
        U::Response: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
        C: ConcurrencyManager<U::Response>,
    {
        let start = Instant::now();

        // CheckCache
        match self.backend.get::<U::Response>(&key).await {
            Ok(Some(value)) => {
                debug!(key = %key, "cache hit");
                let context = CacheContext::hit(self.backend.name());
                record_fetch_metrics(&context, start.elapsed());
                return Ok(Fetched {
                    data: value.into_inner(),
                    context,
                });
            }
            Ok(None) => {
                debug!(key = %key, "cache miss");
            }
            Err(error) => {
                // Lookup errors degrade to a miss.
                warn!(key = %key, %error, "cache lookup failed, falling through to upstream");
            }
        }

        if let ConcurrencyDecision::Await(waiting) = self.concurrency.check(&key) {
            let data = waiting.await;
            let context = CacheContext::miss();
            record_fetch_metrics(&context, start.elapsed());
            return Ok(Fetched { data, context });
        }

        // FetchUpstream
        let upstream_start = Instant::now();
        let response = upstream.call(request).await?;
        record_upstream_duration(upstream_start.elapsed());

        let response = self.concurrency.complete(&key, response);

        // PersistAndReturn: the write is detached and best-effort.
        let value = CacheValue::now(response.clone());
        let backend = Arc::clone(&self.backend);
        let write_key = key.clone();
        self.offload.spawn("cache_write", async move {
            if let Err(error) = backend.set(&write_key, &value).await {
                warn!(key = %write_key, %error, "cache write failed, entry dropped");
            }
        });

        let context = CacheContext::miss();
        record_fetch_metrics(&context, start.elapsed());
        Ok(Fetched {
            data: response,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CacheStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wanderly_memory::InMemoryBackend;

    struct CountingUpstream {
        calls: AtomicUsize,
        payload: serde_json::Value,
    }

    impl CountingUpstream {
        fn new(payload: serde_json::Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                payload,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Upstream<String> for CountingUpstream {
        type Response = serde_json::Value;
        type Error = std::convert::Infallible;

        async fn call(&self, _req: String) -> Result<Self::Response, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    fn lahore_key() -> CacheKey {
        CacheKey::from_part("geocodeCache", "query", "Lahore")
    }

    #[tokio::test]
    async fn test_miss_calls_upstream_once_then_hit_calls_none() {
        let cache = ReadThroughCache::new(InMemoryBackend::new());
        let upstream = CountingUpstream::new(serde_json::json!([{"name": "Lahore"}]));

        let first = cache
            .fetch(lahore_key(), "Lahore".to_owned(), &upstream)
            .await
            .unwrap();
        assert_eq!(first.context.status, CacheStatus::Miss);
        assert_eq!(upstream.calls(), 1);

        // let the detached write land before the second request
        cache.offload_manager().wait_all().await;

        let second = cache
            .fetch(lahore_key(), "Lahore".to_owned(), &upstream)
            .await
            .unwrap();
        assert_eq!(second.context.status, CacheStatus::Hit);
        assert_eq!(second.context.source.as_str(), "memory");
        assert_eq!(upstream.calls(), 1);
        assert_eq!(second.data, first.data);
    }
}
