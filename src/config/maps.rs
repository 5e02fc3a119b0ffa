//! Distance provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for parallel distance queries per search.
pub const MAX_CONCURRENCY: usize = 16;

/// Google Maps configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapsConfig {
    /// Distance Matrix API key
    pub api_key: Secret<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-query timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Language of distance texts (provider default when unset)
    pub language: Option<String>,

    /// Parallel distance queries per search (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl MapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            language: None,
            concurrency: default_concurrency(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate maps configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MAPS__API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("maps base_url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("maps"));
        }
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ValidationError::InvalidConcurrency {
                max: MAX_CONCURRENCY,
            });
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_concurrency() -> usize {
    1
}
