use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::EventResult;
use crate::identity::CallerId;
use crate::query::{EventQuery, PageMeta, QueryResult};
use crate::store::EventStore;

/// Answers listing requests: one page of the caller's matching events plus
/// pagination metadata.
pub struct EventQueryEngine<S: EventStore> {
    store: Arc<S>,
}

impl<S: EventStore> Clone for EventQueryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: EventStore> EventQueryEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count and fetch run concurrently as two independent store calls.
    /// A write landing between them can make `meta.total` differ from what
    /// `data` reflects by the number of such writes; no lock or snapshot
    /// bridges the two reads.
    #[instrument(skip(self, query), fields(caller_id = %caller, page = query.pagination.page(), limit = query.pagination.limit()))]
    pub async fn list_events(&self, caller: CallerId, query: &EventQuery) -> EventResult<QueryResult> {
        let predicate = query.predicate_for(caller);
        let pagination = query.pagination;

        let (total, data) = tokio::try_join!(
            self.store.count(&predicate),
            self.store
                .find(&predicate, pagination.skip(), pagination.limit()),
        )?;

        debug!(total, returned = data.len(), "Listed events");
        Ok(QueryResult {
            data,
            meta: PageMeta::new(pagination, total),
        })
    }
}
