//! Geocoding provider client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use wanderly_core::Upstream;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CANDIDATE_LIMIT: u8 = 5;

/// One candidate location for a place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Display name of the place.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// ISO country code.
    #[serde(default)]
    pub country: String,
}

/// Error type for geocode lookups.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request could not be sent or the response body not read.
    #[error("geocode request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("geocode provider returned {status}")]
    Status {
        /// HTTP status the provider answered with.
        status: reqwest::StatusCode,
    },
}

/// Client for the geocoding provider.
///
/// Requests by place name and returns the provider's ordered candidate
/// list. The whole list is what gets cached; callers take the first
/// candidate.
#[derive(Clone, Debug)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    /// Creates a client against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the provider base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up candidate locations for a place name.
    ///
    /// The place name is passed through as-is; an unknown place yields an
    /// empty list, not an error.
    pub async fn lookup(&self, place: &str) -> Result<Vec<GeoLocation>, GeocodeError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let limit = CANDIDATE_LIMIT.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status { status });
        }

        let candidates: Vec<GeoLocation> = response.json().await?;
        debug!(place, count = candidates.len(), "geocode candidates fetched");
        Ok(candidates)
    }
}

#[async_trait]
impl Upstream<String> for GeocodeClient {
    type Response = Vec<GeoLocation>;
    type Error = GeocodeError;

    async fn call(&self, place: String) -> Result<Self::Response, Self::Error> {
        self.lookup(&place).await
    }
}
