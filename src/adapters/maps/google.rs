//! Google Distance Matrix - DistanceProvider over the Distance Matrix web API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GoogleMapsConfig::new(api_key)
//!     .with_timeout(Duration::from_secs(10))
//!     .with_language("en");
//!
//! let provider = GoogleDistanceMatrix::new(config)?;
//! ```
//!
//! The API answers HTTP 200 for business failures (`OVER_QUERY_LIMIT`,
//! `REQUEST_DENIED`, ...); those come back as a matrix with that status.
//! Only transport failures and non-success HTTP codes become `DistanceError`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::Coordinates;
use crate::domain::nearest::DistanceMatrix;
use crate::ports::{DistanceError, DistanceProvider};

const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// Configuration for the Google distance provider.
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    api_key: Secret<String>,
    /// Base URL (default: https://maps.googleapis.com).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Language for distance texts; provider default when unset.
    pub language: Option<String>,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://maps.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
            language: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Distance provider backed by the Google Distance Matrix API.
pub struct GoogleDistanceMatrix {
    config: GoogleMapsConfig,
    client: Client,
}

impl GoogleDistanceMatrix {
    /// Creates the provider with a client bound to the configured timeout.
    ///
    /// # Errors
    ///
    /// `Network` if the HTTP client cannot be built.
    pub fn new(config: GoogleMapsConfig) -> Result<Self, DistanceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DistanceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            DISTANCE_MATRIX_PATH
        )
    }

    fn query(&self, origin: Coordinates, destination: Coordinates) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("origins", origin.to_query_param()),
            ("destinations", destination.to_query_param()),
            ("units", "metric".to_string()),
            ("key", self.config.api_key().to_string()),
        ];
        if let Some(language) = &self.config.language {
            query.push(("language", language.clone()));
        }
        query
    }

    fn map_request_error(&self, e: reqwest::Error) -> DistanceError {
        if e.is_timeout() {
            DistanceError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            DistanceError::Network(format!("Connection failed: {}", e))
        } else {
            DistanceError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl DistanceProvider for GoogleDistanceMatrix {
    #[tracing::instrument(skip_all, fields(origin = %origin, destination = %destination))]
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DistanceMatrix, DistanceError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&self.query(origin, destination))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Distance matrix request failed");
            return Err(DistanceError::Http {
                status: status.as_u16(),
            });
        }

        let matrix: DistanceMatrix = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_request_error(e)
            } else {
                DistanceError::InvalidResponse(e.to_string())
            }
        })?;

        if !matrix.is_ok() {
            tracing::warn!(
                status = %matrix.status,
                error_message = matrix.error_message.as_deref().unwrap_or_default(),
                "Distance matrix returned non-OK status"
            );
        }

        Ok(matrix)
    }
}
