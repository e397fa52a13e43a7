//! Users Domain
//!
//! Account registration and login for the events API.
//!
//! ```text
//! handlers ──► UserService ──► UserRepository
//!              (argon2, JWT)    ├─ MongoUserRepository
//!                               └─ InMemoryUserRepository
//! ```
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars").unwrap());
//! let router = handlers::router(UserService::new(InMemoryUserRepository::new(), auth));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{LoginRequest, LoginResponse, RegisterUser, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
