//! Process configuration for the MongoDB backend.

use std::env;

use thiserror::Error;
use tracing::info;

const URI_VAR: &str = "MONGODB_URI";
const DB_VAR: &str = "MONGODB_DB";
const DEFAULT_DB: &str = "wanderly";

/// Connection settings for the document store.
///
/// The connection string is required; its absence is a fatal startup
/// condition surfaced as [`ConfigError::MissingUri`] before any request is
/// served. The database name is optional and defaults to `wanderly`.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB connection string.
    pub uri: String,
    /// Database holding the cache collections and the `plans` collection.
    pub database: String,
}

impl MongoConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri = env::var(URI_VAR).map_err(|_| ConfigError::MissingUri)?;
        let database = env::var(DB_VAR).unwrap_or_else(|_| {
            info!("{DB_VAR} not set, using default: {DEFAULT_DB}");
            DEFAULT_DB.to_owned()
        });
        Ok(Self { uri, database })
    }
}

/// Configuration failure at process start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The connection string is absent. The process cannot serve any
    /// request without it.
    #[error("{URI_VAR} environment variable is required")]
    MissingUri,
}
