//! The end-to-end planning flow.

use thiserror::Error;
use tracing::debug;
use wanderly::{CacheStatus, ReadThroughCache};
use wanderly_backend::CacheBackend;
use wanderly_plans::{TripPlanRecord, WeatherSnapshot};
use wanderly_providers::{
    GeoLocation, GeocodeClient, GeocodeError, GeneratedPlan, PlanClient, PlanProviderError,
    WeatherClient, WeatherError, WeatherQuery,
};

use crate::key;
use crate::prompt::build_prompt;

/// Parameters of one planning request, as they arrive from the form.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Destination place name as typed.
    pub destination: String,
    /// Trip duration in days.
    pub days: u32,
    /// Travel style label.
    pub style: String,
    /// Budget label.
    pub budget: String,
    /// Free-text preferences; may be empty.
    pub preferences: String,
}

/// Per-stage cache provenance for one planning request.
///
/// Hosts surface these as the cache badges next to the rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSources {
    /// Whether the geocode stage was served from cache.
    pub geocode: CacheStatus,
    /// Whether the weather stage was served from cache.
    pub weather: CacheStatus,
    /// Whether the generated plan was served from cache.
    pub plan: CacheStatus,
}

/// The assembled result of one planning request.
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    /// The unsaved record, ready for `PlanStore::save`.
    pub record: TripPlanRecord,
    /// Where each stage's payload came from.
    pub sources: StageSources,
}

/// Error type for the planning flow.
///
/// Provider failures surface unchanged; cache-layer failures never appear
/// here (the fetcher absorbs them).
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The geocoder returned no candidate for the requested destination.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The geocode provider failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// The weather provider failed.
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// The plan provider failed, after its one alternate-model attempt.
    #[error(transparent)]
    Plan(#[from] PlanProviderError),
}

/// Orchestrates one planning request across the three cached lookups.
///
/// All three lookups share one backend; each key's prefix routes entries
/// to its collection. The flow mirrors the form submission: resolve the
/// destination, fetch conditions for it, generate the plan, assemble the
/// record.
pub struct TripPlanner<B> {
    cache: ReadThroughCache<B>,
    geocoder: GeocodeClient,
    weather: WeatherClient,
    generator: PlanClient,
}

impl<B> TripPlanner<B>
where
    B: CacheBackend + Send + Sync + 'static,
{
    /// Creates a planner over the given backend and provider clients.
    pub fn new(
        backend: B,
        geocoder: GeocodeClient,
        weather: WeatherClient,
        generator: PlanClient,
    ) -> Self {
        Self {
            cache: ReadThroughCache::new(backend),
            geocoder,
            weather,
            generator,
        }
    }

    /// The underlying read-through cache.
    ///
    /// Exposed so hosts can await
    /// [`wait_all`](wanderly::OffloadManager::wait_all) on shutdown.
    pub fn cache(&self) -> &ReadThroughCache<B> {
        &self.cache
    }

    /// Run the full planning flow for one request.
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlannedTrip, PlannerError> {
        // Resolve the destination; the full candidate list is cached and
        // the first candidate wins.
        let geocoded = self
            .cache
            .fetch(
                key::geocode_key(&request.destination),
                request.destination.clone(),
                &self.geocoder,
            )
            .await?;
        let location = geocoded
            .data
            .first()
            .cloned()
            .ok_or_else(|| PlannerError::LocationNotFound(request.destination.clone()))?;
        debug!(
            destination = %request.destination,
            resolved = %location.name,
            lat = location.lat,
            lon = location.lon,
            "destination resolved"
        );

        let weather = self
            .cache
            .fetch(
                key::weather_key(location.lat, location.lon),
                WeatherQuery {
                    lat: location.lat,
                    lon: location.lon,
                },
                &self.weather,
            )
            .await?;

        let prompt = build_prompt(
            &location.name,
            &location.country,
            request.days,
            &request.style,
            &request.budget,
            &request.preferences,
            &weather.data,
        );
        let generated = self
            .cache
            .fetch(
                key::plan_key(&location.name, request.days, &request.style, &request.budget),
                prompt,
                &self.generator,
            )
            .await?;

        let sources = StageSources {
            geocode: geocoded.context.status,
            weather: weather.context.status,
            plan: generated.context.status,
        };
        let record = assemble(request, &location, weather.data, generated.data);
        Ok(PlannedTrip { record, sources })
    }
}

/// Graft the generated plan onto the trip parameters.
fn assemble(
    request: &PlanRequest,
    location: &GeoLocation,
    weather: WeatherSnapshot,
    generated: GeneratedPlan,
) -> TripPlanRecord {
    TripPlanRecord {
        id: None,
        user_id: None,
        title: None,
        destination: format!("{}, {}", location.name, location.country),
        travel_days: request.days,
        travel_style: request.style.clone(),
        budget: request.budget.clone(),
        preferences: request.preferences.clone(),
        weather: Some(weather),
        itinerary: generated.itinerary,
        hotels: generated.hotels,
        costs: generated.costs,
        packing: generated.packing,
        tips: generated.tips,
        favorite: false,
        rating: 0.0,
        rating_count: 0,
        created_at: None,
        updated_at: None,
    }
}
