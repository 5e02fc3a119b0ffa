//! PhotoStorage port for durable photo files

use async_trait::async_trait;

use crate::domain::foundation::ConversationId;

/// Errors that can occur during photo storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Durable storage for place photos, partitioned per conversation.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Store a photo under a fresh random name in the owner's partition.
    ///
    /// Returns the reference to persist alongside the place.
    async fn write(&self, owner: ConversationId, content: &[u8]) -> Result<String, StorageError>;

    /// Read a previously stored photo.
    async fn read(&self, reference: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove every photo of the owner. Idempotent.
    async fn delete_all(&self, owner: ConversationId) -> Result<(), StorageError>;
}
