use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use wanderly_core::{CacheKey, CacheValue, Raw};

use crate::{BackendError, format::JsonFormat};

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Raw storage interface over a document store.
///
/// `read` returns the payload previously stored under `key`, or `None` on a
/// miss. `write` inserts a new entry; it is only ever called once per miss,
/// so backends need no update semantics. Two concurrent misses for the same
/// key may both call `write` - duplicate entries are acceptable and reads
/// may return either one.
#[async_trait]
pub trait Backend: Sync + Send {
    /// Look up the entry stored under `key`.
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>>;

    /// Insert an entry under `key`.
    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()>;

    /// Returns the name of this backend for response-source reporting.
    fn name(&self) -> &str {
        "backend"
    }
}

#[async_trait]
impl Backend for &dyn Backend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (*self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (*self).write(key, value).await
    }

    fn name(&self) -> &str {
        (*self).name()
    }
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl Backend for Arc<dyn Backend + Send + 'static> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// High-level cache backend trait with typed operations.
///
/// This trait provides typed `get` and `set` operations that handle JSON
/// serialization and deserialization over the raw byte interface. The
/// creation timestamp travels with the payload in both directions.
pub trait CacheBackend: Backend {
    /// Look up and deserialize the payload stored under `key`.
    fn get<T>(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = BackendResult<Option<CacheValue<T>>>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            match self.read(key).await? {
                Some(value) => {
                    let (raw, created_at) = value.into_parts();
                    let data: T = JsonFormat.deserialize(&raw)?;
                    Ok(Some(CacheValue::new(data, created_at)))
                }
                None => Ok(None),
            }
        }
    }

    /// Serialize and insert a payload under `key`.
    fn set<T>(
        &self,
        key: &CacheKey,
        value: &CacheValue<T>,
    ) -> impl Future<Output = BackendResult<()>> + Send
    where
        T: Serialize + Sync,
    {
        async move {
            let raw = JsonFormat.serialize(value.data())?;
            self.write(key, CacheValue::new(raw, value.created_at())).await
        }
    }
}

// Explicit CacheBackend implementations for trait objects
// These use the default implementations from the trait
impl CacheBackend for &dyn Backend {}

impl CacheBackend for Box<dyn Backend> {}

impl CacheBackend for Arc<dyn Backend + Send + 'static> {}
