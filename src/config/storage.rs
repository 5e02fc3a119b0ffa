//! Photo storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local photo storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one `user_<id>` folder per conversation
    #[serde(default = "default_photo_dir")]
    pub photo_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.photo_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__PHOTO_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            photo_dir: default_photo_dir(),
        }
    }
}

fn default_photo_dir() -> PathBuf {
    PathBuf::from("photos")
}
