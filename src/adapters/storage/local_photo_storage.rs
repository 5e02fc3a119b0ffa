//! Filesystem storage adapter for place photos

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::domain::foundation::ConversationId;
use crate::ports::{PhotoStorage, StorageError};

/// Filesystem-based photo storage
///
/// Photos are stored under a configurable base directory, one folder per
/// conversation: {base_dir}/user_{chat_id}/{uuid}.jpg
#[derive(Debug, Clone)]
pub struct LocalPhotoStorage {
    base_dir: PathBuf,
}

impl LocalPhotoStorage {
    /// Create new filesystem storage with base directory
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Photo directory for a conversation
    fn user_dir(&self, owner: ConversationId) -> PathBuf {
        self.base_dir.join(format!("user_{}", owner))
    }

    /// Reject references that point outside the base directory
    fn resolve(&self, reference: &str) -> Result<PathBuf, StorageError> {
        let path = PathBuf::from(reference);
        let escapes = path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes || !path.starts_with(&self.base_dir) {
            return Err(StorageError::InvalidPath(reference.to_string()));
        }
        Ok(path)
    }
}

fn map_io(action: &str, e: std::io::Error) -> StorageError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            StorageError::PermissionDenied(format!("Cannot {}: {}", action, e))
        }
        std::io::ErrorKind::NotFound => StorageError::NotFound(format!("Cannot {}: {}", action, e)),
        _ => StorageError::IoError(format!("Failed to {}: {}", action, e)),
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn write(&self, owner: ConversationId, content: &[u8]) -> Result<String, StorageError> {
        let dir = self.user_dir(owner);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| map_io("create directory", e))?;

        let file_path = dir.join(format!("{}.jpg", Uuid::new_v4()));

        // Write through a temporary file so readers never see a partial photo
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| map_io("write temporary file", e))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| map_io("rename file", e))?;

        Ok(file_path.to_string_lossy().into_owned())
    }

    async fn read(&self, reference: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(reference)?;
        fs::read(&path).await.map_err(|e| map_io("read file", e))
    }

    async fn delete_all(&self, owner: ConversationId) -> Result<(), StorageError> {
        match fs::remove_dir_all(self.user_dir(owner)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io("delete directory", e)),
        }
    }
}
