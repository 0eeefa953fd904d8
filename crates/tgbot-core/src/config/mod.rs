mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::TgError;
use defaults::*;

/// Environment variable consulted when `bot_token` is empty.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: BotConfig,
}

/// Telegram Bot API client settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Scheme and host of the Bot API, without the `/bot<token>` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Transport timeout for a single request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Long-poll hint forwarded as `timeout` on `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// Fixed sleep between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Bound of the update delivery queue. A full queue blocks the poll loop.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Bound of the poll error queue. Errors beyond it are dropped.
    #[serde(default = "default_error_capacity")]
    pub error_capacity: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            poll_timeout_secs: default_poll_timeout(),
            poll_interval_ms: default_poll_interval(),
            queue_capacity: default_queue_capacity(),
            error_capacity: default_error_capacity(),
        }
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("queue_capacity", &self.queue_capacity)
            .field("error_capacity", &self.error_capacity)
            .finish()
    }
}

impl BotConfig {
    /// Config with defaults and the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            bot_token: token.into(),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Fill an empty `bot_token` from `TELEGRAM_BOT_TOKEN`.
    pub fn apply_env(&mut self) {
        if self.bot_token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                self.bot_token = token;
            }
        }
    }

    /// Reject settings the client cannot run with.
    ///
    /// The token is not checked here; a bad token only surfaces as an
    /// authentication failure from the server.
    pub fn validate(&self) -> Result<(), TgError> {
        if self.request_timeout_secs == 0 {
            return Err(TgError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(TgError::Config(
                "queue_capacity must be greater than zero".into(),
            ));
        }
        if self.error_capacity == 0 {
            return Err(TgError::Config(
                "error_capacity must be greater than zero".into(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(TgError::Config(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TgError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, TgError> {
    toml::from_str(content).map_err(|e| TgError::Config(format!("failed to parse config: {e}")))
}
