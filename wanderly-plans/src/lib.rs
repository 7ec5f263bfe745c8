//! Trip plan records and their persistence for Wanderly.
//!
//! A [`TripPlanRecord`] is the assembled output of the planning flow:
//! destination, trip parameters, a weather snapshot, and the generated
//! itinerary, hotels, costs, packing list, and tips. [`PlanStore`] persists
//! records in the `plans` collection: created once per save, later replaced
//! wholesale by id when edited, never patched field by field.

mod error;
mod model;
mod store;

pub use error::PlanError;
pub use model::{
    Activity, CostBreakdown, DayPlan, Hotel, TripPlanRecord, WeatherSnapshot,
};
pub use store::{PlanStore, TripQuery, TripSort, PLANS_COLLECTION};
