//! Event domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::identity::CallerId;

/// Closed set of event kinds accepted on create and update.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EventCategory {
    SingingConcert,
    DancePerformance,
    StandupComedy,
    MovieShow,
    MagicShow,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A stored event. `creator` is stamped once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,

    /// URI of the event image
    pub event_image: String,

    pub event_name: String,

    /// Calendar date, kept as supplied
    #[schema(example = "2025-11-01")]
    pub event_date: String,

    pub event_category: EventCategory,

    /// Owning user
    pub creator: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(input: CreateEvent, creator: CallerId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            event_image: input.event_image,
            event_name: input.event_name,
            event_date: input.event_date,
            event_category: input.event_category,
            creator: creator.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch`. Identity, owner and creation time are untouched.
    pub fn apply(&mut self, patch: &UpdateEvent) {
        if let Some(image) = &patch.event_image {
            self.event_image.clone_from(image);
        }
        if let Some(name) = &patch.event_name {
            self.event_name.clone_from(name);
        }
        if let Some(date) = &patch.event_date {
            self.event_date.clone_from(date);
        }
        if let Some(category) = patch.event_category {
            self.event_category = category;
        }
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /events`. The owner comes from the bearer token; a `creator`
/// field in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 2048, message = "eventImage must be 1-2048 characters"))]
    pub event_image: String,

    #[validate(length(min = 1, max = 255, message = "eventName must be 1-255 characters"))]
    pub event_name: String,

    #[validate(length(min = 1, max = 64, message = "eventDate must be 1-64 characters"))]
    pub event_date: String,

    pub event_category: EventCategory,
}

/// Body of `PATCH /events/{id}`; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 2048, message = "eventImage must be 1-2048 characters"))]
    pub event_image: Option<String>,

    #[validate(length(min = 1, max = 255, message = "eventName must be 1-255 characters"))]
    pub event_name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "eventDate must be 1-64 characters"))]
    pub event_date: Option<String>,

    pub event_category: Option<EventCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn create(name: &str) -> CreateEvent {
        CreateEvent {
            event_image: "https://cdn.example.com/poster.png".to_string(),
            event_name: name.to_string(),
            event_date: "2025-11-01".to_string(),
            event_category: EventCategory::MovieShow,
        }
    }

    #[test]
    fn test_category_wire_names() {
        let names: Vec<_> = EventCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "singingConcert",
                "dancePerformance",
                "standupComedy",
                "movieShow",
                "magicShow"
            ]
        );
        assert_eq!(
            serde_json::to_value(EventCategory::StandupComedy).unwrap(),
            "standupComedy"
        );
        assert_eq!(EventCategory::from_str("magicShow").unwrap(), EventCategory::MagicShow);
        assert!(EventCategory::from_str("MagicShow").is_err());
    }

    #[test]
    fn test_event_json_shape() {
        let owner = CallerId::try_from(Uuid::now_v7()).unwrap();
        let event = Event::new(create("Diwali Mela"), owner);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["_id"], event.id.to_string());
        assert_eq!(json["eventName"], "Diwali Mela");
        assert_eq!(json["eventCategory"], "movieShow");
        assert_eq!(json["creator"], owner.to_string());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_create_event_ignores_creator_field() {
        let body = serde_json::json!({
            "eventImage": "img.png",
            "eventName": "Open Mic",
            "eventDate": "2025-01-01",
            "eventCategory": "standupComedy",
            "creator": Uuid::now_v7(),
        });
        let input: CreateEvent = serde_json::from_value(body).unwrap();
        let owner = CallerId::try_from(Uuid::now_v7()).unwrap();

        assert_eq!(Event::new(input, owner).creator, Uuid::from(owner));
    }

    #[test]
    fn test_create_event_validation() {
        assert!(create("Gig").validate().is_ok());
        assert!(create("").validate().is_err());
        assert!(create(&"x".repeat(256)).validate().is_err());
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let owner = CallerId::try_from(Uuid::now_v7()).unwrap();
        let mut event = Event::new(create("Before"), owner);
        let (id, created_at) = (event.id, event.created_at);

        event.apply(&UpdateEvent {
            event_name: Some("After".to_string()),
            event_category: Some(EventCategory::MagicShow),
            ..Default::default()
        });

        assert_eq!(event.event_name, "After");
        assert_eq!(event.event_category, EventCategory::MagicShow);
        assert_eq!(event.event_date, "2025-11-01");
        assert_eq!(event.id, id);
        assert_eq!(event.created_at, created_at);
        assert_eq!(event.creator, Uuid::from(owner));
        assert!(event.updated_at >= created_at);
    }
}
