use core_config::{ConfigError, FromEnv, env_flag, env_parse_or};

/// Listing and mutation policy for the events API.
///
/// - `EVENTS_DEFAULT_PAGE_SIZE` (10): limit used when the request omits a usable one
/// - `EVENTS_MAX_PAGE_SIZE` (100): larger requested limits are clamped to this
/// - `EVENTS_STRICT_VALIDATION` (false): reject unknown query categories and non `YYYY-MM-DD` dates
/// - `EVENTS_ENFORCE_OWNERSHIP` (true): update/delete only touch the caller's own events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub strict_validation: bool,
    pub enforce_ownership: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            strict_validation: false,
            enforce_ownership: true,
        }
    }
}

impl EventsConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "EVENTS_DEFAULT_PAGE_SIZE".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::Invalid {
                key: "EVENTS_MAX_PAGE_SIZE".to_string(),
                reason: format!(
                    "{} is below EVENTS_DEFAULT_PAGE_SIZE {}",
                    self.max_page_size, self.default_page_size
                ),
            });
        }
        Ok(self)
    }
}

impl FromEnv for EventsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self {
            default_page_size: env_parse_or("EVENTS_DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            max_page_size: env_parse_or("EVENTS_MAX_PAGE_SIZE", defaults.max_page_size)?,
            strict_validation: env_flag("EVENTS_STRICT_VALIDATION", defaults.strict_validation)?,
            enforce_ownership: env_flag("EVENTS_ENFORCE_OWNERSHIP", defaults.enforce_ownership)?,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 4] = [
        "EVENTS_DEFAULT_PAGE_SIZE",
        "EVENTS_MAX_PAGE_SIZE",
        "EVENTS_STRICT_VALIDATION",
        "EVENTS_ENFORCE_OWNERSHIP",
    ];

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(KEYS, || {
            assert_eq!(EventsConfig::from_env().unwrap(), EventsConfig::default());
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("EVENTS_DEFAULT_PAGE_SIZE", Some("20")),
                ("EVENTS_MAX_PAGE_SIZE", Some("50")),
                ("EVENTS_STRICT_VALIDATION", Some("true")),
                ("EVENTS_ENFORCE_OWNERSHIP", Some("false")),
            ],
            || {
                let config = EventsConfig::from_env().unwrap();
                assert_eq!(config.default_page_size, 20);
                assert_eq!(config.max_page_size, 50);
                assert!(config.strict_validation);
                assert!(!config.enforce_ownership);
            },
        );
    }

    #[test]
    fn test_rejects_inconsistent_page_sizes() {
        temp_env::with_vars(
            [
                ("EVENTS_DEFAULT_PAGE_SIZE", Some("50")),
                ("EVENTS_MAX_PAGE_SIZE", Some("10")),
            ],
            || assert!(EventsConfig::from_env().is_err()),
        );
        temp_env::with_var("EVENTS_DEFAULT_PAGE_SIZE", Some("0"), || {
            assert!(EventsConfig::from_env().is_err());
        });
    }
}
