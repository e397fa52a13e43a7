use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, UpdateEvent};
use crate::query::EventPredicate;

/// Persistence seam for events.
///
/// `owner` arguments scope a lookup to one creator; `None` addresses the
/// record by id alone. Listing order is newest first (`createdAt` descending,
/// then id descending) so that pages are stable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn count(&self, predicate: &EventPredicate) -> EventResult<u64>;

    async fn find(&self, predicate: &EventPredicate, skip: u64, limit: u64)
    -> EventResult<Vec<Event>>;

    async fn insert(&self, event: Event) -> EventResult<Event>;

    async fn find_by_id(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<Option<Event>>;

    /// Set the fields present in `patch` and bump `updatedAt` in one atomic
    /// step, so concurrent patches to different fields both survive.
    /// Returns the record as stored afterwards, or `None` if nothing matched.
    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: &UpdateEvent,
    ) -> EventResult<Option<Event>>;

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<bool>;
}

fn owned(event: &Event, owner: Option<Uuid>) -> bool {
    owner.is_none_or(|owner| event.creator == owner)
}

/// In-memory store for development and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn count(&self, predicate: &EventPredicate) -> EventResult<u64> {
        let events = self.events.read().await;
        Ok(events.values().filter(|e| predicate.matches(e)).count() as u64)
    }

    async fn find(
        &self,
        predicate: &EventPredicate,
        skip: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;

        let mut matched: Vec<&Event> = events.values().filter(|e| predicate.matches(e)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(matched
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn insert(&self, event: Event) -> EventResult<Event> {
        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());
        tracing::debug!(event_id = %event.id, "Stored event in memory");
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).filter(|e| owned(e, owner)).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: &UpdateEvent,
    ) -> EventResult<Option<Event>> {
        let mut events = self.events.write().await;
        Ok(events.get_mut(&id).filter(|e| owned(e, owner)).map(|current| {
            current.apply(patch);
            current.clone()
        }))
    }

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> EventResult<bool> {
        let mut events = self.events.write().await;
        if events.get(&id).is_some_and(|e| owned(e, owner)) {
            events.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
