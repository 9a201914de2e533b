//! Load — config loading from file and environment variables.

use std::path::Path;

use super::model::{BotConfig, ConfigError, DEFAULT_CONFIG_PATH};

/// Upper bound for every duration setting, in seconds (one day).
pub const MAX_DURATION_SECS: u64 = 86_400;

impl BotConfig {
    /// Load configuration from `.env`, an optional TOML file, then the environment.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("BOT_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let base = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Apply environment-style overrides. Each setting accepts its current name
    /// first and the legacy name second.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some((_, token)) = first_of(&lookup, &["AUTH_TOKEN", "TELEGRAM_TOKEN"]) {
            self.auth_token = token;
        }
        if let Some((_, allowed)) = first_of(&lookup, &["ALLOWED_IDENTITIES", "ALLOWED_USERS"]) {
            self.allowed_identities = allowed;
        }
        if let Some((key, raw)) = first_of(&lookup, &["REPORT_INTERVAL_SECONDS", "UPDATE_INTERVAL"]) {
            self.report_interval_secs = parse_positive(key, &raw)?;
        }
        if let Some((key, raw)) = first_of(&lookup, &["REPORT_STARTUP_DELAY_SECONDS"]) {
            self.report_startup_delay_secs = parse_number(key, &raw)?;
        }
        if let Some((_, socket)) = first_of(&lookup, &["DOCKER_SOCKET"]) {
            self.docker_socket = socket;
        }
        if let Some((key, raw)) = first_of(&lookup, &["DOCKER_STOP_TIMEOUT_SECONDS"]) {
            self.docker_stop_timeout_secs = Some(parse_number(key, &raw)?);
        }
        if let Some((key, raw)) = first_of(&lookup, &["RUNTIME_TIMEOUT_SECONDS"]) {
            self.runtime_timeout_secs = parse_positive(key, &raw)?;
        }
        if let Some((_, base)) = first_of(&lookup, &["TELEGRAM_API_BASE"]) {
            self.telegram_api_base = base;
        }
        if let Some((key, raw)) = first_of(&lookup, &["POLL_TIMEOUT_SECONDS"]) {
            self.poll_timeout_secs = parse_number(key, &raw)?;
        }
        Ok(self)
    }

    /// Validate that required settings are present and values are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKEN"));
        }
        if self.report_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REPORT_INTERVAL_SECONDS",
                value: "0".to_string(),
                reason: "must be > 0",
            });
        }
        if self.runtime_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "RUNTIME_TIMEOUT_SECONDS",
                value: "0".to_string(),
                reason: "must be > 0",
            });
        }
        at_most("REPORT_INTERVAL_SECONDS", self.report_interval_secs)?;
        at_most("REPORT_STARTUP_DELAY_SECONDS", self.report_startup_delay_secs)?;
        at_most("RUNTIME_TIMEOUT_SECONDS", self.runtime_timeout_secs)?;
        at_most("POLL_TIMEOUT_SECONDS", self.poll_timeout_secs)?;
        if let Some(grace) = self.docker_stop_timeout_secs {
            at_most("DOCKER_STOP_TIMEOUT_SECONDS", u64::from(grace))?;
        }
        if self.telegram_api_base.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "TELEGRAM_API_BASE",
                value: self.telegram_api_base.clone(),
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

/// Blank values count as unset, matching how shells export empty variables.
fn first_of<F>(lookup: &F, keys: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter().find_map(|key| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| (*key, value))
    })
}

fn at_most(key: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs > MAX_DURATION_SECS {
        return Err(ConfigError::Invalid {
            key,
            value: secs.to_string(),
            reason: "must be at most 86400 seconds",
        });
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "expected a non-negative integer",
    })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "expected a positive integer",
    };
    let value: i64 = raw.parse().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(invalid());
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let config = BotConfig::default().with_overrides(lookup(pairs))?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let err = load(&[("ALLOWED_IDENTITIES", "111")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("AUTH_TOKEN")));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let err = load(&[("AUTH_TOKEN", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("AUTH_TOKEN")));
    }

    #[test]
    fn test_minimal_env_uses_defaults() {
        let config = load(&[("AUTH_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.auth_token, "123:abc");
        assert_eq!(config.report_interval_secs, 300);
        assert!(config.allowed_identities.is_empty());
    }

    #[test]
    fn test_report_interval_override() {
        let config = load(&[("AUTH_TOKEN", "t"), ("REPORT_INTERVAL_SECONDS", "60")]).unwrap();
        assert_eq!(config.report_interval_secs, 60);
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let err = load(&[("AUTH_TOKEN", "t"), ("REPORT_INTERVAL_SECONDS", "0")]).unwrap_err();
        assert!(err.to_string().contains("REPORT_INTERVAL_SECONDS"));
    }

    #[test]
    fn test_negative_report_interval_rejected() {
        let err = load(&[("AUTH_TOKEN", "t"), ("REPORT_INTERVAL_SECONDS", "-5")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REPORT_INTERVAL_SECONDS", .. }));
    }

    #[test]
    fn test_non_numeric_report_interval_rejected() {
        let err = load(&[("AUTH_TOKEN", "t"), ("REPORT_INTERVAL_SECONDS", "often")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_legacy_names_accepted() {
        let config = load(&[
            ("TELEGRAM_TOKEN", "legacy"),
            ("ALLOWED_USERS", "12345,67890"),
            ("UPDATE_INTERVAL", "120"),
        ])
        .unwrap();
        assert_eq!(config.auth_token, "legacy");
        assert_eq!(config.allowed_identities, "12345,67890");
        assert_eq!(config.report_interval_secs, 120);
    }

    #[test]
    fn test_current_name_wins_over_legacy() {
        let config = load(&[("AUTH_TOKEN", "new"), ("TELEGRAM_TOKEN", "old")]).unwrap();
        assert_eq!(config.auth_token, "new");
    }

    #[test]
    fn test_legacy_error_names_the_key_used() {
        let err = load(&[("AUTH_TOKEN", "t"), ("UPDATE_INTERVAL", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "UPDATE_INTERVAL", .. }));
    }

    #[test]
    fn test_stop_timeout_and_poll_timeout() {
        let config = load(&[
            ("AUTH_TOKEN", "t"),
            ("DOCKER_STOP_TIMEOUT_SECONDS", "5"),
            ("POLL_TIMEOUT_SECONDS", "0"),
        ])
        .unwrap();
        assert_eq!(config.docker_stop_timeout_secs, Some(5));
        assert_eq!(config.poll_timeout_secs, 0);
    }

    #[test]
    fn test_zero_runtime_timeout_rejected() {
        let err = load(&[("AUTH_TOKEN", "t"), ("RUNTIME_TIMEOUT_SECONDS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RUNTIME_TIMEOUT_SECONDS", .. }));
    }

    #[test]
    fn test_oversized_startup_delay_rejected() {
        let huge = u64::MAX.to_string();
        let err = load(&[("AUTH_TOKEN", "t"), ("REPORT_STARTUP_DELAY_SECONDS", &huge)]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REPORT_STARTUP_DELAY_SECONDS", .. }));
    }

    #[test]
    fn test_oversized_poll_timeout_rejected() {
        let huge = u64::MAX.to_string();
        let err = load(&[("AUTH_TOKEN", "t"), ("POLL_TIMEOUT_SECONDS", &huge)]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "POLL_TIMEOUT_SECONDS", .. }));
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let config = load(&[
            ("AUTH_TOKEN", "t"),
            ("REPORT_INTERVAL_SECONDS", "86400"),
            ("REPORT_STARTUP_DELAY_SECONDS", "86400"),
        ])
        .unwrap();
        assert_eq!(config.report_startup_delay_secs, MAX_DURATION_SECS);

        let err = load(&[("AUTH_TOKEN", "t"), ("REPORT_INTERVAL_SECONDS", "86401")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REPORT_INTERVAL_SECONDS", .. }));
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = BotConfig::from_file("/nonexistent/dockbot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::File { .. }));
    }
}
