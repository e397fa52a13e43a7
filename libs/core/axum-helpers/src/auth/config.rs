use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

pub const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// JWT signing configuration.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ACCESS_TOKEN_TTL_SECS` (default 3600)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        })
    }

    pub fn with_ttl_secs(mut self, ttl: i64) -> Self {
        self.access_token_ttl_secs = ttl;
        self
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key: "JWT_SECRET".to_string(),
            reason: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;

        let access_token_ttl_secs =
            env_parse_or("JWT_ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        if access_token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_TTL_SECS".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            access_token_ttl_secs,
        })
    }
}
