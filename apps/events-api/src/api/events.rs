//! Events API routes backed by MongoDB

use axum::Router;
use domain_events::{EventService, MongoEventStore, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let store = MongoEventStore::new(&state.db);
    let service = EventService::new(store, state.config.events.clone());

    info!(
        enforce_ownership = state.config.events.enforce_ownership,
        strict_validation = state.config.events.strict_validation,
        max_page_size = state.config.events.max_page_size,
        "Events routes configured"
    );

    handlers::router(service)
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoEventStore::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {e}"))
}
