//! Error types for MongoDB backend operations.
//!
//! All errors convert to [`BackendError`] for uniform handling across
//! cache backends; the read-through fetcher absorbs them either way.
//!
//! [`BackendError`]: wanderly_backend::BackendError

use wanderly_backend::BackendError;

/// Error type for MongoDB backend operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying MongoDB driver.
    ///
    /// This includes connection failures, authentication failures, and
    /// command execution errors. The connection is established lazily, so
    /// an unreachable server surfaces here on the first cache operation.
    #[error("MongoDB backend error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A stored document could not be converted back into a JSON payload.
    #[error("stored payload is not valid BSON: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// A payload could not be converted into a BSON document for storage.
    #[error("payload is not representable as BSON: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

impl From<Error> for BackendError {
    fn from(error: Error) -> Self {
        match &error {
            Error::Mongo(_) => Self::ConnectionError(Box::new(error)),
            _ => Self::InternalError(Box::new(error)),
        }
    }
}
