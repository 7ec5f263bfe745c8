//! The `plans` collection store.

use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc, oid::ObjectId},
};
use tracing::debug;

use crate::error::PlanError;
use crate::model::TripPlanRecord;

/// Name of the collection trip plans are persisted in.
pub const PLANS_COLLECTION: &str = "plans";

const DEFAULT_LIMIT: i64 = 50;

/// Filter and ordering for listing saved trips.
///
/// All filter fields are optional and combined with logical AND. The
/// destination filter is a case-insensitive substring match.
#[derive(Debug, Clone, Default)]
pub struct TripQuery {
    /// Restrict to one user's trips.
    pub user_id: Option<String>,
    /// Case-insensitive destination substring.
    pub destination: Option<String>,
    /// Exact budget label.
    pub budget: Option<String>,
    /// Exact travel style label.
    pub style: Option<String>,
    /// Result ordering.
    pub sort: TripSort,
    /// Maximum number of records; defaults to 50.
    pub limit: Option<i64>,
}

/// Ordering for listed trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripSort {
    /// Newest first (default).
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Alphabetical by destination.
    Destination,
}

/// Store for [`TripPlanRecord`]s over the `plans` collection.
///
/// Records are inserted once per save and replaced wholesale by id when
/// edited; there is no field-level patching.
#[derive(Clone, Debug)]
pub struct PlanStore {
    collection: Collection<TripPlanRecord>,
}

impl PlanStore {
    /// Creates a store over the given database's `plans` collection.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(PLANS_COLLECTION),
        }
    }

    /// Validate and insert a new plan, returning the assigned id.
    ///
    /// Applies save-time defaults (title, favorite, rating) and stamps
    /// `createdAt`/`updatedAt`. Validation happens before any store write.
    pub async fn save(&self, mut record: TripPlanRecord) -> Result<ObjectId, PlanError> {
        record.validate()?;

        let now = DateTime::now();
        record.id = None;
        if record.title.is_none() {
            record.title = Some(format!("{} Trip Plan", record.destination));
        }
        record.created_at = Some(now);
        record.updated_at = Some(now);

        let result = self.collection.insert_one(&record).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(PlanError::MissingId)?;

        debug!(
            id = %id,
            destination = %record.destination,
            days = record.travel_days,
            "trip plan saved"
        );
        Ok(id)
    }

    /// Fetch one plan by id.
    pub async fn get(&self, id: ObjectId) -> Result<Option<TripPlanRecord>, PlanError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// List saved plans matching `query`.
    pub async fn list(&self, query: &TripQuery) -> Result<Vec<TripPlanRecord>, PlanError> {
        let cursor = self
            .collection
            .find(filter_document(query))
            .sort(sort_document(query.sort))
            .limit(query.limit.unwrap_or(DEFAULT_LIMIT))
            .await?;
        let trips: Vec<TripPlanRecord> = cursor.try_collect().await?;
        debug!(count = trips.len(), "trips retrieved");
        Ok(trips)
    }

    /// Replace the plan stored under `id` wholesale.
    ///
    /// The original `createdAt` is preserved and `updatedAt` restamped.
    /// Returns `false` when no plan with that id exists.
    pub async fn replace(&self, id: ObjectId, mut record: TripPlanRecord) -> Result<bool, PlanError> {
        record.validate()?;

        record.id = Some(id);
        record.updated_at = Some(DateTime::now());
        if record.created_at.is_none() {
            record.created_at = self
                .collection
                .find_one(doc! { "_id": id })
                .await?
                .and_then(|existing| existing.created_at);
        }

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &record)
            .await?;
        Ok(result.matched_count > 0)
    }
}

fn filter_document(query: &TripQuery) -> Document {
    let mut filter = Document::new();
    if let Some(user_id) = &query.user_id {
        filter.insert("userId", user_id);
    }
    if let Some(destination) = &query.destination {
        filter.insert(
            "destination",
            doc! { "$regex": destination, "$options": "i" },
        );
    }
    if let Some(budget) = &query.budget {
        filter.insert("budget", budget);
    }
    if let Some(style) = &query.style {
        filter.insert("travelStyle", style);
    }
    filter
}

fn sort_document(sort: TripSort) -> Document {
    match sort {
        TripSort::Newest => doc! { "createdAt": -1 },
        TripSort::Oldest => doc! { "createdAt": 1 },
        TripSort::Destination => doc! { "destination": 1 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_builds_empty_filter() {
        let filter = filter_document(&TripQuery::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter_combines_fields() {
        let query = TripQuery {
            user_id: Some("u-42".to_owned()),
            destination: Some("lahore".to_owned()),
            budget: Some("Budget".to_owned()),
            style: Some("Cultural".to_owned()),
            ..TripQuery::default()
        };
        let filter = filter_document(&query);
        assert_eq!(filter.get_str("userId").unwrap(), "u-42");
        assert_eq!(filter.get_str("budget").unwrap(), "Budget");
        assert_eq!(filter.get_str("travelStyle").unwrap(), "Cultural");

        let destination = filter.get_document("destination").unwrap();
        assert_eq!(destination.get_str("$regex").unwrap(), "lahore");
        assert_eq!(destination.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_sort_orderings() {
        assert_eq!(sort_document(TripSort::Newest), doc! { "createdAt": -1 });
        assert_eq!(sort_document(TripSort::Oldest), doc! { "createdAt": 1 });
        assert_eq!(
            sort_document(TripSort::Destination),
            doc! { "destination": 1 }
        );
    }
}
