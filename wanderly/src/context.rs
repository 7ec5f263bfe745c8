//! Cache context types for tracking where a response came from.

use smol_str::SmolStr;

/// Whether the request resulted in a cache hit or miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    /// Cache hit - a cached payload was found and returned.
    Hit,
    /// Cache miss - no cached payload was found (or the lookup failed).
    #[default]
    Miss,
}

impl CacheStatus {
    /// Returns the status as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }

    /// `true` when the payload came out of the cache.
    #[inline]
    pub const fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

/// Source of the response - either the live upstream or a cache backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseSource {
    /// Response came from the upstream provider (cache miss).
    #[default]
    Upstream,
    /// Response came from the cache backend with the given name.
    Backend(SmolStr),
}

impl ResponseSource {
    /// Returns the source as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            ResponseSource::Upstream => "upstream",
            ResponseSource::Backend(name) => name,
        }
    }
}

/// Context information about a completed cache operation.
#[derive(Debug, Clone, Default)]
pub struct CacheContext {
    /// Whether the request resulted in a cache hit or miss.
    pub status: CacheStatus,
    /// Source of the response.
    pub source: ResponseSource,
}

impl CacheContext {
    /// Context for a hit served out of the named backend.
    pub fn hit(backend: impl Into<SmolStr>) -> Self {
        CacheContext {
            status: CacheStatus::Hit,
            source: ResponseSource::Backend(backend.into()),
        }
    }

    /// Context for a miss served from the live upstream.
    pub fn miss() -> Self {
        CacheContext {
            status: CacheStatus::Miss,
            source: ResponseSource::Upstream,
        }
    }
}

/// A payload together with the context describing where it came from.
///
/// Callers that surface cache provenance (the planner reports per-stage
/// cache badges) read [`CacheContext::status`]; callers that only need the
/// payload call [`Fetched::into_inner`].
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// The payload.
    pub data: T,
    /// Where the payload came from.
    pub context: CacheContext,
}

impl<T> Fetched<T> {
    /// `true` when the payload was served from cache.
    pub fn is_hit(&self) -> bool {
        self.context.status.is_hit()
    }

    /// Consumes the wrapper and returns the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_context() {
        let ctx = CacheContext::hit("memory");
        assert_eq!(ctx.status, CacheStatus::Hit);
        assert_eq!(ctx.source.as_str(), "memory");
    }

    #[test]
    fn test_miss_context() {
        let ctx = CacheContext::miss();
        assert_eq!(ctx.status, CacheStatus::Miss);
        assert_eq!(ctx.source, ResponseSource::Upstream);
        assert_eq!(ctx.source.as_str(), "upstream");
    }
}
