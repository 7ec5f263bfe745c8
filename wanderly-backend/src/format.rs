//! Payload serialization for cache storage.
//!
//! Cached payloads are the upstream providers' responses stored verbatim,
//! so the only wire format is JSON. [`JsonFormat`] converts between typed
//! payloads and the raw byte representation backends store.

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use wanderly_core::Raw;

/// Serialization or deserialization failure for a cached payload.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Payload could not be serialized for storage.
    #[error("failed to serialize cache payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Stored bytes could not be deserialized into the expected payload type.
    #[error("failed to deserialize cache payload: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// JSON payload format (the only format; the document store is JSON-native).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    /// Serialize a payload to raw bytes.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Raw, FormatError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(FormatError::Serialize)
    }

    /// Deserialize raw bytes back into a payload.
    pub fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, FormatError> {
        serde_json::from_slice(data).map_err(FormatError::Deserialize)
    }
}
