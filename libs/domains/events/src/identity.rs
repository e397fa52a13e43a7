use axum::{extract::FromRequestParts, http::request::Parts};
use axum_helpers::JwtClaims;
use std::fmt;
use uuid::Uuid;

use crate::error::EventError;

/// The authenticated user an operation runs on behalf of.
///
/// Always a valid, non-nil id; construct it with [`CallerId::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallerId(Uuid);

impl CallerId {
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EventError::InvalidIdentity("caller id is empty".to_string()));
        }

        let id = Uuid::parse_str(raw)
            .map_err(|_| EventError::InvalidIdentity(format!("'{raw}' is not a valid user id")))?;

        Self::try_from(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl TryFrom<Uuid> for CallerId {
    type Error = EventError;

    fn try_from(id: Uuid) -> Result<Self, Self::Error> {
        if id.is_nil() {
            return Err(EventError::InvalidIdentity("caller id is nil".to_string()));
        }
        Ok(Self(id))
    }
}

impl From<CallerId> for Uuid {
    fn from(caller: CallerId) -> Self {
        caller.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolves the caller from the verified token subject.
///
/// Missing claims or a subject that is not a user id yield `401` before any
/// handler logic runs.
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = EventError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| EventError::InvalidIdentity("request is not authenticated".to_string()))?;

        CallerId::parse(&claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = Uuid::now_v7();
        let caller = CallerId::parse(&format!("  {id} ")).unwrap();
        assert_eq!(caller.as_uuid(), id);
    }

    #[test]
    fn test_parse_rejects_missing_or_malformed() {
        for raw in ["", "   ", "user-42", "00000000-0000-0000-0000-000000000000"] {
            assert!(
                matches!(CallerId::parse(raw), Err(EventError::InvalidIdentity(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
