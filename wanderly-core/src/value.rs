//! Cached value type with creation metadata.
//!
//! [`CacheValue`] wraps a payload with the timestamp of its first fetch.
//! Entries carry no expiry or staleness information: the store has no TTL
//! and no eviction. An entry is created on cache miss, immediately after
//! the first successful upstream fetch, and is never mutated or deleted.

use chrono::{DateTime, Utc};

/// A cached payload with its creation timestamp.
///
/// Wraps any data type `T` with the UTC time of the first fetch. The
/// payload is stored verbatim; `created_at` is informational only and is
/// never consulted for invalidation.
///
/// # Example
///
/// ```
/// use wanderly_core::CacheValue;
///
/// let value = CacheValue::now("payload");
/// assert_eq!(value.data(), &"payload");
/// let inner = value.into_inner();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CacheValue<T> {
    data: T,
    created_at: DateTime<Utc>,
}

impl<T> CacheValue<T> {
    /// Creates a cache value with the given data and creation time.
    pub fn new(data: T, created_at: DateTime<Utc>) -> Self {
        CacheValue { data, created_at }
    }

    /// Creates a cache value stamped with the current time.
    pub fn now(data: T) -> Self {
        CacheValue {
            data,
            created_at: Utc::now(),
        }
    }

    /// Returns a reference to the cached payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns when the payload was first fetched.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Consumes the cache value and returns the inner payload.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Consumes the cache value and returns payload and timestamp separately.
    pub fn into_parts(self) -> (T, DateTime<Utc>) {
        (self.data, self.created_at)
    }

    /// Maps the payload type while preserving the creation timestamp.
    pub fn map<U, F>(self, f: F) -> CacheValue<U>
    where
        F: FnOnce(T) -> U,
    {
        CacheValue {
            data: f(self.data),
            created_at: self.created_at,
        }
    }
}
