//! Telegram Bot API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Telegram configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather (`<bot id>:<secret>`)
    pub bot_token: Secret<String>,

    /// Bot API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long-poll wait for `getUpdates`, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Secret::new(bot_token.into()),
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let token = self.bot_token.expose_secret();
        if token.is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
        }
        match token.split_once(':') {
            Some((id, secret))
                if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !secret.is_empty() => {}
            _ => return Err(ValidationError::InvalidBotToken),
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("telegram api_base_url"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("telegram request"));
        }
        if self.request_timeout_secs <= self.poll_timeout_secs {
            return Err(ValidationError::PollTimeoutTooLong);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TelegramConfig::new("123456:ABC-DEF");
        assert_eq!(config.api_base_url, "https://api.telegram.org");
        assert_eq!(config.poll_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_token_is_missing() {
        assert_eq!(
            TelegramConfig::new("").validate(),
            Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"))
        );
    }

    #[test]
    fn malformed_token_is_rejected() {
        for token in ["no-colon", ":secret", "12ab:secret", "123:"] {
            assert_eq!(
                TelegramConfig::new(token).validate(),
                Err(ValidationError::InvalidBotToken),
                "token {token}"
            );
        }
    }

    #[test]
    fn request_timeout_must_outlast_poll() {
        let config = TelegramConfig {
            poll_timeout_secs: 60,
            request_timeout_secs: 60,
            ..TelegramConfig::new("1:x")
        };
        assert_eq!(config.validate(), Err(ValidationError::PollTimeoutTooLong));
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let config = TelegramConfig::new("123456:very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
