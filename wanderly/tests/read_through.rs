//! Integration tests for the read-through fetcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wanderly::{CacheKey, CacheStatus, CacheValue, Raw, ReadThroughCache, Upstream};
use wanderly_backend::{Backend, BackendError, BackendResult, CacheBackend};
use wanderly_memory::InMemoryBackend;

/// Upstream double that counts calls and waits a moment before answering,
/// leaving a window for concurrent misses to overlap.
struct CountingUpstream {
    calls: Arc<AtomicUsize>,
    payload: serde_json::Value,
    delay: Duration,
}

impl CountingUpstream {
    fn new(payload: serde_json::Value) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            payload,
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
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
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.payload.clone())
    }
}

/// Upstream double that always fails.
struct BrokenUpstream;

#[derive(Debug, PartialEq)]
struct UpstreamDown;

impl std::fmt::Display for UpstreamDown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("upstream down")
    }
}

impl std::error::Error for UpstreamDown {}

#[async_trait]
impl Upstream<String> for BrokenUpstream {
    type Response = serde_json::Value;
    type Error = UpstreamDown;

    async fn call(&self, _req: String) -> Result<Self::Response, Self::Error> {
        Err(UpstreamDown)
    }
}

/// Backend wrapper whose reads and/or writes fail on demand.
#[derive(Clone)]
struct FlakyBackend {
    inner: InMemoryBackend,
    fail_reads: bool,
    fail_writes: bool,
    write_attempts: Arc<AtomicUsize>,
}

impl FlakyBackend {
    fn new(fail_reads: bool, fail_writes: bool) -> Self {
        Self {
            inner: InMemoryBackend::new(),
            fail_reads,
            fail_writes,
            write_attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn broken() -> BackendError {
        BackendError::ConnectionError(Box::new(std::io::Error::other("store unreachable")))
    }
}

#[async_trait]
impl Backend for FlakyBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        if self.fail_reads {
            return Err(Self::broken());
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(Self::broken());
        }
        self.inner.write(key, value).await
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

impl CacheBackend for FlakyBackend {}

fn geocode_key(place: &str) -> CacheKey {
    CacheKey::from_part("geocodeCache", "query", place)
}

#[tokio::test]
async fn test_unknown_key_misses_and_calls_upstream_exactly_once() {
    let cache = ReadThroughCache::new(InMemoryBackend::new());
    let upstream = CountingUpstream::new(serde_json::json!([{"name": "Lahore", "lat": 31.5204}]));

    let fetched = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();

    assert_eq!(fetched.context.status, CacheStatus::Miss);
    assert_eq!(fetched.context.source.as_str(), "upstream");
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_known_key_hits_and_calls_upstream_never() {
    let cache = ReadThroughCache::new(InMemoryBackend::new());
    let upstream = CountingUpstream::new(serde_json::json!([{"name": "Lahore", "lat": 31.5204}]));

    let first = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();
    cache.offload_manager().wait_all().await;

    let second = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();

    assert_eq!(second.context.status, CacheStatus::Hit);
    assert_eq!(second.data, first.data);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_persistence_failure_does_not_alter_returned_payload() {
    let backend = FlakyBackend::new(false, true);
    let attempts = backend.write_attempts.clone();
    let cache = ReadThroughCache::new(backend);
    let payload = serde_json::json!({"temp": 24.5, "description": "haze"});
    let upstream = CountingUpstream::new(payload.clone());

    let fetched = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();

    assert_eq!(fetched.data, payload);
    assert_eq!(fetched.context.status, CacheStatus::Miss);

    // exactly one best-effort attempt, no retry
    cache.offload_manager().wait_all().await;
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    // the failed write left nothing behind, so the next request misses again
    let again = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();
    assert_eq!(again.context.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_lookup_error_degrades_to_miss() {
    let cache = ReadThroughCache::new(FlakyBackend::new(true, true));
    let upstream = CountingUpstream::new(serde_json::json!({"ok": true}));

    let fetched = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream)
        .await
        .unwrap();

    assert_eq!(fetched.context.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_upstream_failure_is_terminal_and_nothing_is_cached() {
    let backend = InMemoryBackend::new();
    let cache = ReadThroughCache::new(backend.clone());

    let err = cache
        .fetch(geocode_key("Lahore"), "Lahore".to_owned(), &BrokenUpstream)
        .await
        .unwrap_err();

    assert_eq!(err, UpstreamDown);
    cache.offload_manager().wait_all().await;
    assert_eq!(backend.entry_count(), 0);
}

#[tokio::test]
async fn test_concurrent_identical_misses_may_both_fetch() {
    let cache = ReadThroughCache::new(InMemoryBackend::new());
    let upstream = CountingUpstream::new(serde_json::json!({"itinerary": []}))
        .with_delay(Duration::from_millis(20));

    let key = CacheKey::from_part("aiResponseCache", "digest", "deadbeef");
    let (a, b) = tokio::join!(
        cache.fetch(key.clone(), "prompt".to_owned(), &upstream),
        cache.fetch(key.clone(), "prompt".to_owned(), &upstream),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.data, b.data);
    // no mutual exclusion: both misses reached upstream and both persisted
    assert_eq!(upstream.calls(), 2);
    cache.offload_manager().wait_all().await;
}

#[tokio::test]
async fn test_caller_never_waits_on_persistence() {
    // a write that blocks forever must not delay the response
    #[derive(Clone)]
    struct StuckBackend(InMemoryBackend);

    #[async_trait]
    impl Backend for StuckBackend {
        async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
            self.0.read(key).await
        }

        async fn write(&self, _key: &CacheKey, _value: CacheValue<Raw>) -> BackendResult<()> {
            std::future::pending::<()>().await;
            Ok(())
        }

        fn name(&self) -> &str {
            "stuck"
        }
    }

    impl CacheBackend for StuckBackend {}

    let cache = ReadThroughCache::new(StuckBackend(InMemoryBackend::new()));
    let upstream = CountingUpstream::new(serde_json::json!({"ok": true}));

    let fetched = tokio::time::timeout(
        Duration::from_secs(1),
        cache.fetch(geocode_key("Lahore"), "Lahore".to_owned(), &upstream),
    )
    .await
    .expect("response must not be gated on the cache write")
    .unwrap();

    assert_eq!(fetched.data, serde_json::json!({"ok": true}));
    cache.offload_manager().cancel_all();
}
