//! Weather provider client.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use wanderly_core::Upstream;
use wanderly_plans::WeatherSnapshot;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Coordinates for a current-conditions request.
///
/// Passed to the provider exactly as received; rounding for cache keys
/// happens in the key derivation, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherQuery {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// Error type for weather lookups.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be sent or the response body not read.
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("weather provider returned {status}")]
    Status {
        /// HTTP status the provider answered with.
        status: reqwest::StatusCode,
    },

    /// The payload parsed but carried no conditions entry.
    #[error("weather payload missing conditions")]
    MalformedPayload,
}

// Provider wire shape; flattened into WeatherSnapshot before anything
// else sees it.
#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: MainSection,
    weather: Vec<ConditionSection>,
    wind: WindSection,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: f64,
}

/// Client for the weather provider.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
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

    /// Fetch current conditions for the given coordinates, in metric units.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "metric".to_owned()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status { status });
        }

        let conditions: CurrentConditions = response.json().await?;
        let condition = conditions
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MalformedPayload)?;

        let snapshot = WeatherSnapshot {
            temp: conditions.main.temp,
            description: condition.description,
            humidity: conditions.main.humidity,
            wind_speed: conditions.wind.speed,
            icon: condition.icon,
        };
        debug!(lat, lon, temp = snapshot.temp, "current conditions fetched");
        Ok(snapshot)
    }
}

#[async_trait]
impl Upstream<WeatherQuery> for WeatherClient {
    type Response = WeatherSnapshot;
    type Error = WeatherError;

    async fn call(&self, query: WeatherQuery) -> Result<Self::Response, Self::Error> {
        self.current(query.lat, query.lon).await
    }
}
