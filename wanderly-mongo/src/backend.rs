//! MongoDB backend implementation.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use mongodb::{
    Client, Database,
    bson::{self, Bson, DateTime as BsonDateTime, Document, doc},
};
use tokio::sync::OnceCell;
use tracing::trace;
use wanderly_backend::{Backend, BackendError, BackendResult, CacheBackend};
use wanderly_core::{CacheKey, CacheValue, Raw};

use crate::config::MongoConfig;
use crate::error::Error;

const KEY_FIELD: &str = "key";
const PAYLOAD_FIELD: &str = "payload";
const CREATED_AT_FIELD: &str = "createdAt";

/// MongoDB cache backend based on the official driver.
///
/// Each cache key's prefix names the collection the entry lives in, so a
/// single backend serves `geocodeCache`, `weatherCache`, and
/// `aiResponseCache` alike. Documents hold the rendered key string, the
/// payload verbatim, and the creation timestamp; nothing else.
///
/// The [`Client`] is created lazily on the first operation and then reused
/// for the process lifetime, with no explicit teardown. There is no unique
/// index on the key field: two concurrent misses for one key may insert
/// two documents, and reads simply take the first match.
#[derive(Clone, Debug)]
pub struct MongoBackend {
    connection_info: String,
    database_name: String,
    database: OnceCell<Database>,
    name: String,
}

impl MongoBackend {
    /// Creates a backend from loaded process configuration.
    pub fn from_config(config: &MongoConfig) -> Self {
        Self::builder()
            .server(&config.uri)
            .database(&config.database)
            .build()
    }

    /// Creates a new MongoBackend builder with default settings.
    #[must_use]
    pub fn builder() -> MongoBackendBuilder {
        MongoBackendBuilder::default()
    }

    /// Lazily connect and return the database handle.
    pub async fn database(&self) -> Result<&Database, BackendError> {
        trace!("Get database handle");
        let database = self
            .database
            .get_or_try_init(|| async {
                trace!("Initialize new MongoDB client");
                let client = Client::with_uri_str(&self.connection_info).await?;
                Ok::<_, mongodb::error::Error>(client.database(&self.database_name))
            })
            .await
            .map_err(Error::from)?;
        Ok(database)
    }

    fn collection_name(key: &CacheKey) -> &str {
        let prefix = key.prefix();
        if prefix.is_empty() { "cache" } else { prefix }
    }
}

/// Part of builder pattern implementation for MongoBackend.
pub struct MongoBackendBuilder {
    connection_info: String,
    database_name: String,
    name: String,
}

impl Default for MongoBackendBuilder {
    fn default() -> Self {
        Self {
            connection_info: "mongodb://127.0.0.1:27017/".to_owned(),
            database_name: "wanderly".to_owned(),
            name: "mongo".to_owned(),
        }
    }
}

impl MongoBackendBuilder {
    /// Set the connection string (host, port, credentials, etc.).
    pub fn server(mut self, connection_info: impl Into<String>) -> Self {
        self.connection_info = connection_info.into();
        self
    }

    /// Set the database holding the cache collections.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database_name = database.into();
        self
    }

    /// Set a custom name for this backend, used in response-source
    /// reporting.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create a new instance of the MongoDB backend with passed settings.
    ///
    /// The connection string is not validated here; the client connects
    /// lazily on the first cache operation.
    pub fn build(self) -> MongoBackend {
        MongoBackend {
            connection_info: self.connection_info,
            database_name: self.database_name,
            database: OnceCell::new(),
            name: self.name,
        }
    }
}

#[async_trait]
impl Backend for MongoBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        let collection = self
            .database()
            .await?
            .collection::<Document>(Self::collection_name(key));

        let found = collection
            .find_one(doc! { KEY_FIELD: key.render() })
            .await
            .map_err(Error::from)?;

        let Some(document) = found else {
            return Ok(None);
        };

        let payload = document.get(PAYLOAD_FIELD).cloned().unwrap_or(Bson::Null);
        let json: serde_json::Value = bson::from_bson(payload).map_err(Error::from)?;
        let raw = Bytes::from(serde_json::to_vec(&json).map_err(|err| {
            BackendError::InternalError(Box::new(err))
        })?);

        let created_at = document
            .get_datetime(CREATED_AT_FIELD)
            .ok()
            .and_then(|dt| DateTime::from_timestamp_millis(dt.timestamp_millis()))
            .unwrap_or_else(Utc::now);

        Ok(Some(CacheValue::new(raw, created_at)))
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        let collection = self
            .database()
            .await?
            .collection::<Document>(Self::collection_name(key));

        let (raw, created_at) = value.into_parts();
        let json: serde_json::Value = serde_json::from_slice(&raw)
            .map_err(|err| BackendError::InternalError(Box::new(err)))?;
        let payload = bson::to_bson(&json).map_err(Error::from)?;

        collection
            .insert_one(doc! {
                KEY_FIELD: key.render(),
                PAYLOAD_FIELD: payload,
                CREATED_AT_FIELD: BsonDateTime::from_millis(created_at.timestamp_millis()),
            })
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// Explicit CacheBackend implementation using default trait methods
impl CacheBackend for MongoBackend {}
