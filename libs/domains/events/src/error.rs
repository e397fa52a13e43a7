use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum EventError {
    /// Caller id missing, empty or not a user id. Raised before the store is touched.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid pagination: page={page}, limit={limit} (both must be at least 1)")]
    InvalidPagination { page: u64, limit: u64 },

    #[error("Event {0} not found")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    /// Any persistence failure; surfaced as-is, never retried.
    #[error("Event store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidIdentity(msg) => AppError::Unauthorized(msg),
            e @ EventError::InvalidPagination { .. } => AppError::BadRequest(e.to_string()),
            EventError::NotFound(id) => AppError::NotFound(format!("Event {id} not found")),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::InvalidInput(errors) => AppError::ValidationError(errors),
            EventError::StoreUnavailable(msg) => AppError::DatabaseUnavailable(msg),
            EventError::Serialization(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::InvalidIdentity("x".into()), StatusCode::UNAUTHORIZED),
            (
                EventError::InvalidPagination { page: 0, limit: 10 },
                StatusCode::BAD_REQUEST,
            ),
            (EventError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (EventError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                EventError::StoreUnavailable("timeout".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                EventError::Serialization("bad bson".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
