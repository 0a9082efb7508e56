// src/config.rs
//! Runtime configuration, read once from the environment at startup.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_REVIEW_TOKEN: &str = "PRAKTIKUM_TOKEN";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_REVIEW_URL: &str = "PRAKTIKUM_URL";
pub const ENV_BOT_API_URL: &str = "TELEGRAM_API_URL";
pub const ENV_POLL_INTERVAL: &str = "POLL_INTERVAL_SECS";
pub const ENV_RETRY_INTERVAL: &str = "RETRY_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "LOG_FILE";

pub const DEFAULT_REVIEW_URL: &str = "https://praktikum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Immutable settings shared by the review client, the notifier and the poller.
#[derive(Clone)]
pub struct Config {
    pub review_token: String,
    pub bot_token: String,
    pub chat_id: String,
    pub review_url: String,
    pub bot_api_url: String,
    pub poll_interval: Duration,
    pub retry_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let secs = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            let n = match get(key) {
                None => default,
                Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: key,
                    reason: format!("{raw:?} is not a whole number of seconds ({e})"),
                })?,
            };
            if n == 0 {
                return Err(ConfigError::Invalid {
                    var: key,
                    reason: "must be greater than zero".into(),
                });
            }
            Ok(Duration::from_secs(n))
        };

        let cfg = Self {
            review_token: required(ENV_REVIEW_TOKEN)?,
            bot_token: required(ENV_BOT_TOKEN)?,
            chat_id: required(ENV_CHAT_ID)?,
            review_url: get(ENV_REVIEW_URL).unwrap_or_else(|| DEFAULT_REVIEW_URL.to_string()),
            bot_api_url: get(ENV_BOT_API_URL)
                .unwrap_or_else(|| DEFAULT_BOT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            poll_interval: secs(ENV_POLL_INTERVAL, DEFAULT_POLL_INTERVAL_SECS)?,
            retry_interval: secs(ENV_RETRY_INTERVAL, DEFAULT_RETRY_INTERVAL_SECS)?,
            request_timeout: secs(ENV_REQUEST_TIMEOUT, DEFAULT_REQUEST_TIMEOUT_SECS)?,
        };

        if cfg.retry_interval >= cfg.poll_interval {
            return Err(ConfigError::Invalid {
                var: ENV_RETRY_INTERVAL,
                reason: format!(
                    "retry interval ({}s) must be shorter than poll interval ({}s)",
                    cfg.retry_interval.as_secs(),
                    cfg.poll_interval.as_secs()
                ),
            });
        }

        Ok(cfg)
    }
}

// Credentials stay out of logs; only their lengths are shown.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("review_token_len", &self.review_token.len())
            .field("bot_token_len", &self.bot_token.len())
            .field("chat_id", &self.chat_id)
            .field("review_url", &self.review_url)
            .field("bot_api_url", &self.bot_api_url)
            .field("poll_interval", &self.poll_interval)
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
