//! Events Domain
//!
//! Identity-scoped event management: create, read, update and delete events
//! owned by the authenticated user, and list them with search, category
//! filtering and pagination.
//!
//! # Architecture
//!
//! ```text
//! handlers ──► EventService ──► EventQueryEngine ──► EventStore
//!   (CallerId)   (ownership,       (count + find)      ├─ MongoEventStore
//!                 validation)                          └─ InMemoryEventStore
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod service;
pub mod store;

pub use config::EventsConfig;
pub use engine::EventQueryEngine;
pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use identity::CallerId;
pub use models::{CreateEvent, Event, EventCategory, UpdateEvent};
pub use mongodb::MongoEventStore;
pub use query::{EventPredicate, EventQuery, ListEventsParams, PageMeta, Pagination, QueryResult};
pub use service::EventService;
pub use store::{EventStore, InMemoryEventStore};
