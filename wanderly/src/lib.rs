#![warn(missing_docs)]
//! Asynchronous read-through caching for the Wanderly travel planner.
//!
//! The central type is [`ReadThroughCache`](fetcher::ReadThroughCache),
//! which drives one state machine per request: check the cache, fall
//! through to the upstream provider on miss, return the fresh payload, and
//! persist it as a detached best-effort task.

/// Duplicate-miss coordination seam.
///
/// Two simultaneous misses for the same key both fetch upstream and both
/// persist - duplicate entries are tolerated, not deduplicated. This module
/// provides the [`ConcurrencyManager`](concurrency::ConcurrencyManager)
/// seam for hosts that want to strengthen that into an
/// at-most-once-per-key guarantee; the default
/// [`NoopConcurrencyManager`](concurrency::NoopConcurrencyManager)
/// preserves the duplicate-fetch behavior.
pub mod concurrency;

/// Cache context and status types.
///
/// This module provides:
/// - [`CacheContext`](context::CacheContext) - where a response came from
/// - [`CacheStatus`](context::CacheStatus) - hit or miss
/// - [`ResponseSource`](context::ResponseSource) - cache backend or live upstream
pub mod context;

/// The read-through fetcher.
///
/// Orchestrates cache lookups, upstream calls, and fire-and-forget
/// persistence. Cache-layer failures are absorbed (a failed lookup is a
/// miss, a failed write is logged and dropped); upstream failures are the
/// only terminal error.
pub mod fetcher;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module provides counters
/// and histograms for:
/// - Cache hits and misses
/// - Request latency and upstream call timing
/// - Offload task lifecycle
pub mod metrics;

/// Background task offloading for fire-and-forget persistence.
///
/// Cache writes never gate the caller's response. This module provides the
/// [`OffloadManager`](offload::OffloadManager) that spawns and tracks those
/// detached tasks.
pub mod offload;

pub use concurrency::{ConcurrencyDecision, ConcurrencyManager, NoopConcurrencyManager};
pub use context::{CacheContext, CacheStatus, Fetched, ResponseSource};
pub use fetcher::ReadThroughCache;
pub use offload::OffloadManager;

pub use wanderly_core::{CacheKey, CacheValue, KeyPart, Offload, Raw, Upstream};

/// The `wanderly` prelude.
///
/// Provides convenient access to the most commonly used types:
///
/// ```rust
/// use wanderly::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{CacheKey, CacheStatus, Fetched, ReadThroughCache, Upstream};
}
