//! Traits and structs for Wanderly backend interaction.
//!
//! If you want to implement your own document-store backend, you are in the
//! right place. A backend is a mapping from [`CacheKey`](wanderly_core::CacheKey)
//! to a raw payload plus a creation timestamp; the contract is intentionally
//! small: `read` and `write`, nothing else. Entries are never updated or
//! deleted, and no concurrency control is required beyond whatever the
//! underlying store provides for concurrent inserts under the same key.

mod backend;
mod error;
pub mod format;

pub use backend::{Backend, BackendResult, CacheBackend};
pub use error::BackendError;
pub use format::{FormatError, JsonFormat};
