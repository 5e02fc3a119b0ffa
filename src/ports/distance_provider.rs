//! Distance Provider Port - live distance between two coordinates.
//!
//! Implementations return the provider's matrix as is; classifying the
//! statuses and distance texts is domain work (`domain::nearest`).

use async_trait::async_trait;

use crate::domain::foundation::Coordinates;
use crate::domain::nearest::DistanceMatrix;

/// Failures before a provider response could be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistanceError {
    #[error("Distance request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl DistanceError {
    /// Status token surfaced to the user in place of a provider status.
    pub fn status_token(&self) -> String {
        match self {
            DistanceError::Timeout { .. } => "TIMEOUT".to_string(),
            DistanceError::Network(_) => "NETWORK_ERROR".to_string(),
            DistanceError::Http { status } => format!("HTTP_{}", status),
            DistanceError::InvalidResponse(_) => "INVALID_RESPONSE".to_string(),
        }
    }
}

/// Port for one-origin, one-destination distance queries.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DistanceMatrix, DistanceError>;
}
