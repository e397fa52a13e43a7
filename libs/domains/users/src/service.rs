use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, RegisterUser, User, UserResponse, normalize_email};
use crate::repository::UserRepository;

const TOKEN_TYPE: &str = "Bearer";

/// Registration and login
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    auth: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, auth: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            auth,
        }
    }

    /// Create an account; the email must not be taken (case-insensitive)
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repository
            .create(User::new(input.name.trim().to_string(), email, password_hash))
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Check credentials and issue an access token
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        input.validate()?;

        let user = self
            .repository
            .find_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let issued = self
            .auth
            .issue_access_token(user.id, &user.email, &user.name, &[])?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: issued.expires_in,
            user: user.into(),
        })
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum_helpers::JwtConfig;

    fn service() -> (UserService<InMemoryUserRepository>, JwtAuth) {
        let auth = JwtAuth::new(&JwtConfig::new("users-service-test-secret-0123456789ab").unwrap());
        (UserService::new(InMemoryUserRepository::new(), auth.clone()), auth)
    }

    fn register(email: &str) -> RegisterUser {
        RegisterUser {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (svc, auth) = service();

        let user = svc.register(register("Asha@Example.com")).await.unwrap();
        assert_eq!(user.email, "asha@example.com");

        let login = svc
            .login(LoginRequest {
                email: "asha@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(login.token_type, "Bearer");
        assert_eq!(login.user, user);
        let claims = auth.verify_token(&login.access_token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict() {
        let (svc, _) = service();
        svc.register(register("dup@example.com")).await.unwrap();

        assert!(matches!(
            svc.register(register("DUP@example.com")).await,
            Err(UserError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let (svc, _) = service();
        svc.register(register("asha@example.com")).await.unwrap();

        let wrong_password = svc
            .login(LoginRequest {
                email: "asha@example.com".to_string(),
                password: "nope-nope".to_string(),
            })
            .await;
        let unknown_email = svc
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(UserError::InvalidCredentials)));
    }
}
