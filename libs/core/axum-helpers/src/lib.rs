//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`auth`]**: stateless JWT issuing/verification and route guard
//! - **[`server`]**: router assembly with OpenAPI UIs, health, graceful shutdown
//! - **[`http`]**: CORS and security header layers
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: UUID path and validated JSON extractors
//!
//! ```ignore
//! let api = Router::new().nest("/events", events_router);
//! let app = axum_helpers::create_router::<ApiDoc>(api)?
//!     .merge(axum_helpers::health_router(core_config::app_info!()));
//! axum_helpers::create_production_app(app, &server_config, async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{AuthError, IssuedToken, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal, with_docs_and_layers,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
