//! MongoDB backend for the Wanderly caching layer.
//!
//! Routes each cache key to the collection named by its prefix
//! (`geocodeCache`, `weatherCache`, `aiResponseCache`) and stores the
//! payload verbatim alongside the rendered key string and a creation
//! timestamp. The client is constructed once per process and connects
//! lazily on first use.

mod backend;
mod config;
mod error;

pub use backend::{MongoBackend, MongoBackendBuilder};
pub use config::{ConfigError, MongoConfig};
pub use error::Error;
