//! The trip plan record and its component types.
//!
//! Field names serialize in camelCase to match the documents the `plans`
//! collection holds (`travelDays`, `travelStyle`, `pricePerNight`, ...).

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// One scheduled activity within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Start time as displayed, e.g. `09:00 AM`.
    pub time: String,
    /// Activity name.
    pub activity: String,
    /// Specific location.
    pub location: String,
    /// Brief description.
    pub description: String,
    /// Estimated cost as displayed, e.g. `$25`. Not every activity has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

/// One day of the itinerary: a theme and an ordered list of activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// Display label, e.g. `Day 1`.
    pub day: String,
    /// Theme for the day.
    pub theme: String,
    /// Ordered activities.
    pub activities: Vec<Activity>,
}

/// A recommended hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Hotel name.
    pub name: String,
    /// Rating as displayed, e.g. `4.5`.
    pub rating: String,
    /// Nightly price as displayed, e.g. `$150`.
    pub price_per_night: String,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Brief description.
    pub description: String,
    /// Booking search link.
    pub booking_link: String,
}

/// Estimated cost breakdown for the whole trip, in display form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Accommodation subtotal.
    pub accommodation: String,
    /// Transportation subtotal.
    pub transportation: String,
    /// Food subtotal.
    pub food: String,
    /// Activities subtotal.
    pub activities: String,
    /// Trip total.
    pub total: String,
}

/// Current conditions at the destination when the plan was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Temperature in °C.
    pub temp: f64,
    /// Conditions description, e.g. `haze`.
    pub description: String,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Provider icon code, e.g. `50d`.
    pub icon: String,
}

/// A persisted trip plan.
///
/// `destination` and a non-empty `itinerary` are mandatory at creation;
/// [`TripPlanRecord::validate`] enforces this before any store write.
/// Everything else is optional with defaults applied on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanRecord {
    /// Store-assigned identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user, when known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Display title; defaults to `{destination} Trip Plan` on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Destination as displayed, e.g. `Lahore, Pakistan`.
    pub destination: String,
    /// Trip duration in days.
    pub travel_days: u32,
    /// Travel style label, e.g. `Adventure`.
    pub travel_style: String,
    /// Budget label, e.g. `Mid-range`.
    pub budget: String,
    /// Free-text preferences from the request.
    #[serde(default)]
    pub preferences: String,
    /// Conditions at generation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    /// Ordered day plans. Mandatory and non-empty.
    pub itinerary: Vec<DayPlan>,
    /// Recommended hotels.
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    /// Estimated costs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostBreakdown>,
    /// Packing list items.
    #[serde(default)]
    pub packing: Vec<String>,
    /// Destination tips.
    #[serde(default)]
    pub tips: Vec<String>,
    /// Favorite flag.
    #[serde(default)]
    pub favorite: bool,
    /// Aggregate rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of ratings aggregated.
    #[serde(default)]
    pub rating_count: u32,
    /// First save time. Stamped by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    /// Last save time. Restamped on every replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl TripPlanRecord {
    /// Check the creation invariant: destination and itinerary are
    /// mandatory. Called by the store before any write.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.destination.trim().is_empty() {
            return Err(PlanError::Validation("destination"));
        }
        if self.itinerary.is_empty() {
            return Err(PlanError::Validation("itinerary"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_record() -> TripPlanRecord {
        TripPlanRecord {
            id: None,
            user_id: None,
            title: None,
            destination: "Lahore, Pakistan".to_owned(),
            travel_days: 3,
            travel_style: "Cultural".to_owned(),
            budget: "Mid-range".to_owned(),
            preferences: String::new(),
            weather: None,
            itinerary: vec![DayPlan {
                day: "Day 1".to_owned(),
                theme: "Old city".to_owned(),
                activities: vec![Activity {
                    time: "09:00 AM".to_owned(),
                    activity: "Lahore Fort".to_owned(),
                    location: "Walled City".to_owned(),
                    description: "Mughal-era citadel".to_owned(),
                    cost: Some("$5".to_owned()),
                }],
            }],
            hotels: Vec::new(),
            costs: None,
            packing: Vec::new(),
            tips: Vec::new(),
            favorite: false,
            rating: 0.0,
            rating_count: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        assert!(minimal_record().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_destination() {
        let mut record = minimal_record();
        record.destination = "   ".to_owned();
        let err = record.validate().unwrap_err();
        assert!(matches!(err, PlanError::Validation("destination")));
    }

    #[test]
    fn test_validate_rejects_empty_itinerary() {
        let mut record = minimal_record();
        record.itinerary.clear();
        let err = record.validate().unwrap_err();
        assert!(matches!(err, PlanError::Validation("itinerary")));
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let record = minimal_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["travelDays"], 3);
        assert_eq!(json["travelStyle"], "Cultural");
        assert_eq!(json["ratingCount"], 0);
        assert!(json.get("travel_days").is_none());
    }

    #[test]
    fn test_deserializes_sparse_document() {
        // documents written before optional fields existed still load
        let json = serde_json::json!({
            "destination": "Lahore, Pakistan",
            "travelDays": 2,
            "travelStyle": "Relaxed",
            "budget": "Budget",
            "itinerary": [
                {"day": "Day 1", "theme": "Food", "activities": []}
            ]
        });
        let record: TripPlanRecord = serde_json::from_value(json).unwrap();
        assert!(!record.favorite);
        assert_eq!(record.rating, 0.0);
        assert!(record.hotels.is_empty());
        assert!(record.created_at.is_none());
    }
}
