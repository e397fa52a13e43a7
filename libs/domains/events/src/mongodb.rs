//! MongoDB implementation of [`EventStore`]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{self, Document, doc};
use mongodb::options::{FindOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventCategory, UpdateEvent};
use crate::query::EventPredicate;
use crate::store::EventStore;

const COLLECTION: &str = "events";

/// Stored shape of an event: ids as strings, timestamps as BSON dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    #[serde(rename = "_id")]
    id: String,
    event_image: String,
    event_name: String,
    event_date: String,
    event_category: EventCategory,
    creator: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

fn parse_stored_id(field: &str, raw: &str) -> EventResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| EventError::Serialization(format!("stored {field} '{raw}' is not a uuid: {e}")))
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            event_image: event.event_image.clone(),
            event_name: event.event_name.clone(),
            event_date: event.event_date.clone(),
            event_category: event.event_category,
            creator: event.creator.to_string(),
            created_at: to_bson_datetime(event.created_at),
            updated_at: to_bson_datetime(event.updated_at),
        }
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(doc: EventDocument) -> EventResult<Self> {
        Ok(Self {
            id: parse_stored_id("_id", &doc.id)?,
            creator: parse_stored_id("creator", &doc.creator)?,
            event_image: doc.event_image,
            event_name: doc.event_name,
            event_date: doc.event_date,
            event_category: doc.event_category,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
        })
    }
}

/// Translate a predicate into a MongoDB filter.
///
/// Search text is regex-escaped, so user input always matches literally.
pub(crate) fn build_filter(predicate: &EventPredicate) -> Document {
    let mut filter = doc! { "creator": predicate.creator.to_string() };

    if let Some(category) = &predicate.category {
        filter.insert("eventCategory", category.as_str());
    }

    if let Some(search) = &predicate.search {
        filter.insert(
            "eventName",
            doc! { "$regex": regex::escape(search), "$options": "i" },
        );
    }

    filter
}

/// `$set` of only the fields present in `patch`, plus `updatedAt`.
pub(crate) fn build_update(patch: &UpdateEvent, now: DateTime<Utc>) -> Document {
    let mut set = doc! { "updatedAt": to_bson_datetime(now) };

    if let Some(image) = &patch.event_image {
        set.insert("eventImage", image.as_str());
    }
    if let Some(name) = &patch.event_name {
        set.insert("eventName", name.as_str());
    }
    if let Some(date) = &patch.event_date {
        set.insert("eventDate", date.as_str());
    }
    if let Some(category) = patch.event_category {
        set.insert("eventCategory", category.as_str());
    }

    doc! { "$set": set }
}

fn id_filter(id: Uuid, owner: Option<Uuid>) -> Document {
    let mut filter = doc! { "_id": id.to_string() };
    if let Some(owner) = owner {
        filter.insert("creator", owner.to_string());
    }
    filter
}

/// Sorted listing window, or `None` when `skip` is past what the server can
/// address (`i64::MAX`). No collection holds that many documents, so such a
/// page is empty.
pub(crate) fn find_options(skip: u64, limit: u64) -> Option<FindOptions> {
    i64::try_from(skip).ok()?;
    Some(
        FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build(),
    )
}

/// MongoDB-backed event store
#[derive(Clone)]
pub struct MongoEventStore {
    collection: Collection<EventDocument>,
}

impl MongoEventStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Create indexes backing the owner-scoped listing and category filter
    pub async fn create_indexes(&self) -> EventResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "creator": 1, "createdAt": -1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "creator": 1, "eventCategory": 1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = COLLECTION, "Event indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    #[instrument(skip(self, predicate), fields(creator = %predicate.creator))]
    async fn count(&self, predicate: &EventPredicate) -> EventResult<u64> {
        let count = self
            .collection
            .count_documents(build_filter(predicate))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, predicate), fields(creator = %predicate.creator))]
    async fn find(
        &self,
        predicate: &EventPredicate,
        skip: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let Some(options) = find_options(skip, limit) else {
            tracing::debug!(skip, "Page starts beyond any storable offset");
            return Ok(Vec::new());
        };

        let cursor = self
            .collection
            .find(build_filter(predicate))
            .with_options(options)
            .await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: Event) -> EventResult<Event> {
        self.collection
            .insert_one(EventDocument::from(&event))
            .await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<Option<Event>> {
        self.collection
            .find_one(id_filter(id, owner))
            .await?
            .map(Event::try_from)
            .transpose()
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: &UpdateEvent,
    ) -> EventResult<Option<Event>> {
        self.collection
            .find_one_and_update(id_filter(id, owner), build_update(patch, Utc::now()))
            .return_document(ReturnDocument::After)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<bool> {
        let result = self.collection.delete_one(id_filter(id, owner)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CallerId;
    use crate::models::CreateEvent;

    #[test]
    fn test_build_filter_owner_only() {
        let owner = Uuid::now_v7();
        let filter = build_filter(&EventPredicate::owned_by(owner));
        assert_eq!(filter, doc! { "creator": owner.to_string() });
    }

    #[test]
    fn test_build_filter_escapes_search() {
        let owner = Uuid::now_v7();
        let predicate = EventPredicate {
            creator: owner,
            search: Some("rock (live)".to_string()),
            category: Some("singingConcert".to_string()),
        };

        let filter = build_filter(&predicate);
        assert_eq!(filter.get_str("eventCategory").unwrap(), "singingConcert");

        let name = filter.get_document("eventName").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"rock \(live\)");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_update_sets_only_present_fields() {
        let now = Utc::now();
        let update = build_update(
            &UpdateEvent {
                event_name: Some("Salsa night".to_string()),
                event_category: Some(EventCategory::DancePerformance),
                ..Default::default()
            },
            now,
        );

        assert_eq!(
            update,
            doc! {
                "$set": {
                    "updatedAt": to_bson_datetime(now),
                    "eventName": "Salsa night",
                    "eventCategory": "dancePerformance",
                }
            }
        );
    }

    #[test]
    fn test_build_update_empty_patch_only_touches_timestamp() {
        let now = Utc::now();
        let update = build_update(&UpdateEvent::default(), now);
        assert_eq!(update, doc! { "$set": { "updatedAt": to_bson_datetime(now) } });
    }

    #[test]
    fn test_id_filter_scopes_owner_when_given() {
        let (id, owner) = (Uuid::now_v7(), Uuid::now_v7());
        assert_eq!(id_filter(id, None), doc! { "_id": id.to_string() });
        assert_eq!(
            id_filter(id, Some(owner)),
            doc! { "_id": id.to_string(), "creator": owner.to_string() }
        );
    }

    #[test]
    fn test_find_options_window() {
        let options = find_options(10, 5).unwrap();
        assert_eq!(options.skip, Some(10));
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.sort, Some(doc! { "createdAt": -1, "_id": -1 }));

        assert!(find_options(i64::MAX as u64, 5).is_some());
    }

    #[test]
    fn test_find_options_past_addressable_offset() {
        assert!(find_options(u64::MAX, 10).is_none());
        assert!(find_options(i64::MAX as u64 + 1, 10).is_none());
    }

    #[test]
    fn test_document_conversion_keeps_fields() {
        let owner = CallerId::try_from(Uuid::now_v7()).unwrap();
        let event = Event::new(
            CreateEvent {
                event_image: "img.png".to_string(),
                event_name: "Jazz Night".to_string(),
                event_date: "2025-09-09".to_string(),
                event_category: EventCategory::SingingConcert,
            },
            owner,
        );

        let document = EventDocument::from(&event);
        assert_eq!(document.creator, owner.to_string());

        let back = Event::try_from(document).unwrap();
        assert_eq!(back.id, event.id);
        assert_eq!(back.creator, event.creator);
        assert_eq!(
            back.created_at.timestamp_millis(),
            event.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_corrupt_stored_id_is_serialization_error() {
        let document = EventDocument {
            id: "not-a-uuid".to_string(),
            event_image: String::new(),
            event_name: String::new(),
            event_date: String::new(),
            event_category: EventCategory::MagicShow,
            creator: Uuid::now_v7().to_string(),
            created_at: bson::DateTime::now(),
            updated_at: bson::DateTime::now(),
        };
        assert!(matches!(
            Event::try_from(document),
            Err(EventError::Serialization(_))
        ));
    }
}
