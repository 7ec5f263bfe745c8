use futures::future::BoxFuture;

use crate::CacheKey;

/// Result of concurrency check - whether to proceed with the upstream call
/// or await a response already in flight for the same key.
pub enum ConcurrencyDecision<Res> {
    /// Proceed with the upstream call.
    Proceed,
    /// Await the response of another in-flight request.
    Await(BoxFuture<'static, Res>),
}

/// Trait for coordinating concurrent misses on the same key.
///
/// The fetcher consults this before each upstream call. An implementation
/// backed by a per-key in-flight table can turn simultaneous identical
/// misses into a single upstream call; the default
/// [`NoopConcurrencyManager`] keeps the store's native behavior, where
/// each miss fetches and persists independently and duplicate entries are
/// tolerated.
pub trait ConcurrencyManager<Res>: Send + Sync {
    /// Check whether this request should call upstream or await an existing request.
    fn check(&self, cache_key: &CacheKey) -> ConcurrencyDecision<Res>;

    /// Hand the fresh response to any waiting requests and return it back.
    fn complete(&self, cache_key: &CacheKey, response: Res) -> Res;
}

/// No-op implementation that always allows requests to proceed.
pub struct NoopConcurrencyManager;

impl<Res> ConcurrencyManager<Res> for NoopConcurrencyManager
where
    Res: Send + 'static,
{
    fn check(&self, _cache_key: &CacheKey) -> ConcurrencyDecision<Res> {
        ConcurrencyDecision::Proceed
    }

    fn complete(&self, _cache_key: &CacheKey, response: Res) -> Res {
        // No-op: just return the response
        response
    }
}
