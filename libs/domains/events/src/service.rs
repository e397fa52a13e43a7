//! Event service layer

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::config::EventsConfig;
use crate::engine::EventQueryEngine;
use crate::error::{EventError, EventResult};
use crate::identity::CallerId;
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::query::{ListEventsParams, QueryResult};
use crate::store::EventStore;

const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity-scoped event operations.
///
/// Every call takes the resolved [`CallerId`]; listing and reads only ever see
/// the caller's own events. Whether update and delete are owner-scoped is
/// decided by [`EventsConfig::enforce_ownership`].
pub struct EventService<S: EventStore> {
    store: Arc<S>,
    engine: EventQueryEngine<S>,
    config: EventsConfig,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S, config: EventsConfig) -> Self {
        let store = Arc::new(store);
        Self {
            engine: EventQueryEngine::new(Arc::clone(&store)),
            store,
            config,
        }
    }

    pub fn config(&self) -> &EventsConfig {
        &self.config
    }

    /// Owner scope applied to mutations.
    fn mutation_scope(&self, caller: CallerId) -> Option<Uuid> {
        self.config.enforce_ownership.then(|| caller.into())
    }

    fn check_date(&self, date: &str) -> EventResult<()> {
        if self.config.strict_validation && NaiveDate::parse_from_str(date, EVENT_DATE_FORMAT).is_err()
        {
            return Err(EventError::Validation(format!(
                "eventDate '{date}' must be formatted as YYYY-MM-DD"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, params), fields(caller_id = %caller))]
    pub async fn list_events(
        &self,
        caller: CallerId,
        params: ListEventsParams,
    ) -> EventResult<QueryResult> {
        let query = params.normalize(&self.config)?;
        self.engine.list_events(caller, &query).await
    }

    #[instrument(skip(self, input), fields(caller_id = %caller, event_name = %input.event_name))]
    pub async fn create(&self, caller: CallerId, input: CreateEvent) -> EventResult<Event> {
        input.validate()?;
        self.check_date(&input.event_date)?;

        let event = self.store.insert(Event::new(input, caller)).await?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self), fields(caller_id = %caller))]
    pub async fn get(&self, caller: CallerId, id: Uuid) -> EventResult<Event> {
        self.store
            .find_by_id(id, Some(caller.into()))
            .await?
            .ok_or(EventError::NotFound(id))
    }

    #[instrument(skip(self, patch), fields(caller_id = %caller))]
    pub async fn update(&self, caller: CallerId, id: Uuid, patch: UpdateEvent) -> EventResult<Event> {
        patch.validate()?;
        if let Some(date) = &patch.event_date {
            self.check_date(date)?;
        }

        let event = self
            .store
            .update(id, self.mutation_scope(caller), &patch)
            .await?
            .ok_or(EventError::NotFound(id))?;

        info!(event_id = %id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(self), fields(caller_id = %caller))]
    pub async fn delete(&self, caller: CallerId, id: Uuid) -> EventResult<()> {
        if !self.store.delete(id, self.mutation_scope(caller)).await? {
            return Err(EventError::NotFound(id));
        }

        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}
