//! Shared application state passed to route builders.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

use crate::config::Config;

/// Cloned per router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shares the underlying connection pool
    pub mongo_client: Client,
    pub db: Database,
    /// Signs login tokens and verifies bearer tokens
    pub auth: JwtAuth,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client, db: Database) -> Self {
        let auth = JwtAuth::new(&config.jwt);
        Self {
            config,
            mongo_client,
            db,
            auth,
        }
    }
}
