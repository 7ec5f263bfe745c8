//! End-to-end trip planning for Wanderly.
//!
//! [`TripPlanner`](planner::TripPlanner) ties the pieces together: it
//! resolves the destination through the geocode cache, fetches current
//! conditions through the weather cache, generates the plan through the AI
//! cache, and assembles an unsaved
//! [`TripPlanRecord`](wanderly_plans::TripPlanRecord) ready for
//! [`PlanStore::save`](wanderly_plans::PlanStore::save).

pub mod key;
pub mod planner;
pub mod prompt;

pub use key::{geocode_key, plan_key, weather_key};
pub use planner::{PlanRequest, PlannedTrip, PlannerError, StageSources, TripPlanner};
pub use prompt::build_prompt;
