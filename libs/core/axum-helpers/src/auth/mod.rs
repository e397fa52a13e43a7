//! Stateless bearer-token authentication.
//!
//! [`JwtAuth`] signs and verifies HS256 access tokens; [`jwt_auth_middleware`]
//! guards routes and stores the verified [`JwtClaims`] in request extensions,
//! where handlers pick them up as an extractor.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let protected = Router::new()
//!     .route("/events", get(list_events))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{AuthError, IssuedToken, JwtAuth, JwtClaims};
pub use middleware::{extract_token_from_headers, jwt_auth_middleware};
