//! Error types for backend operations.

use crate::format::FormatError;
use thiserror::Error;

/// Error type for backend operations.
///
/// This enum categorizes errors that can occur during cache backend
/// interactions into distinct groups for appropriate handling. The
/// read-through fetcher absorbs all of them: a failing `read` degrades to a
/// cache miss, a failing `write` is logged and discarded.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    ///
    /// Any error not related to network interaction.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send>),

    /// Network interaction error.
    ///
    /// Errors occurring during communication with remote stores (e.g. MongoDB).
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send>),

    /// Serialization or deserialization error.
    #[error(transparent)]
    FormatError(#[from] FormatError),
}
