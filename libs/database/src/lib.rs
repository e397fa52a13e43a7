//! Database connectivity shared by the API binaries.
//!
//! - `mongodb` (default): connection pooling, startup retry, health checks
//! - `config` (default): `core_config::FromEnv` support for [`mongodb::MongoConfig`]

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
