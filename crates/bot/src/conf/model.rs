//! Model — BotConfig and the configuration error type.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/dockbot/bot.toml";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("failed to read config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Process-wide configuration. Built once at boot, read-only afterwards.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Telegram bot token.
    pub auth_token: String,
    /// Raw comma-separated allow list, parsed by [`crate::auth::AllowList`].
    pub allowed_identities: String,
    pub report_interval_secs: u64,
    /// Delay before the first periodic report, so the transport can connect.
    pub report_startup_delay_secs: u64,
    pub docker_socket: String,
    /// Grace period handed to Docker on stop/restart. `None` = daemon default.
    pub docker_stop_timeout_secs: Option<u32>,
    /// Upper bound for a single container listing issued by the reporter.
    pub runtime_timeout_secs: u64,
    pub telegram_api_base: String,
    /// Long-poll timeout for getUpdates.
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn report_startup_delay(&self) -> Duration {
        Duration::from_secs(self.report_startup_delay_secs)
    }

    pub fn runtime_timeout(&self) -> Duration {
        Duration::from_secs(self.runtime_timeout_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            allowed_identities: String::new(),
            report_interval_secs: 300,
            report_startup_delay_secs: 10,
            docker_socket: String::new(),
            docker_stop_timeout_secs: None,
            runtime_timeout_secs: 10,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            poll_timeout_secs: 30,
        }
    }
}

// The token ends up in request URLs; keep it out of logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("auth_token", &"<redacted>")
            .field("allowed_identities", &self.allowed_identities)
            .field("report_interval_secs", &self.report_interval_secs)
            .field("report_startup_delay_secs", &self.report_startup_delay_secs)
            .field("docker_socket", &self.docker_socket)
            .field("docker_stop_timeout_secs", &self.docker_stop_timeout_secs)
            .field("runtime_timeout_secs", &self.runtime_timeout_secs)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}
