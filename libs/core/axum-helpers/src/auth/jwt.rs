use super::config::JwtConfig;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtClaims {
    /// Subject: the user id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => AppError::InternalServerError(msg),
            AuthError::InvalidToken(_) => AppError::Unauthorized("Invalid token".to_string()),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
    pub claims: JwtClaims,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// HS256 token signer and verifier. Cheap to clone.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
    access_token_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.access_token_ttl_secs, "JWT auth initialized");
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            }),
            access_token_ttl_secs: config.access_token_ttl_secs,
        }
    }

    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            exp: (now + Duration::seconds(self.access_token_ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.access_token_ttl_secs,
            claims,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.keys.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

/// Claims placed in extensions by [`super::jwt_auth_middleware`].
/// Rejects with 401 on routes that are not behind the middleware.
impl<S> FromRequestParts<S> for JwtClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(ttl: i64) -> JwtAuth {
        let config = JwtConfig::new("unit-test-secret-that-is-long-enough-123")
            .unwrap()
            .with_ttl_secs(ttl);
        JwtAuth::new(&config)
    }

    #[test]
    fn test_issue_then_verify() {
        let auth = auth(60);
        let user_id = Uuid::now_v7();
        let issued = auth
            .issue_access_token(user_id, "asha@example.com", "Asha", &[])
            .unwrap();

        assert_eq!(issued.expires_in, 60);
        let claims = auth.verify_token(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "asha@example.com");
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = JwtAuth::new(
            &JwtConfig::new("a-completely-different-secret-of-length").unwrap(),
        );
        let issued = other
            .issue_access_token(Uuid::now_v7(), "x@example.com", "X", &[])
            .unwrap();

        assert!(matches!(
            auth(60).verify_token(&issued.token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Past the default 60s leeway.
        let auth = auth(-120);
        let issued = auth
            .issue_access_token(Uuid::now_v7(), "x@example.com", "X", &[])
            .unwrap();

        assert!(matches!(auth.verify_token(&issued.token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(auth(60).verify_token("not.a.jwt").is_err());
    }
}
