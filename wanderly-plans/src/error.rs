//! Error types for plan persistence.

use thiserror::Error;

/// Error type for plan validation and persistence.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A mandatory field is absent or empty. Raised before any store
    /// write happens.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// An error from the underlying MongoDB driver.
    #[error("plan store error: {0}")]
    Store(#[from] mongodb::error::Error),

    /// The store accepted the insert but returned no object id.
    #[error("store did not return an object id for the inserted plan")]
    MissingId,
}
