//! HTTP routes, nested under `/api` by `axum_helpers::create_router`.

pub mod events;
pub mod health;
pub mod users;

use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use mongodb::Database;

use crate::state::AppState;

/// Public account routes, bearer-protected event routes and readiness
pub fn routes(state: &AppState) -> Router {
    let protected = Router::new()
        .nest("/events", events::router(state))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .merge(users::router(state))
        .merge(health::router(state.clone()))
}

/// Create collection indexes before serving traffic
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    events::init_indexes(db).await?;
    users::init_indexes(db).await?;
    Ok(())
}
