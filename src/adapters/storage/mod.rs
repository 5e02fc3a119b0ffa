//! Storage Adapters
//!
//! Implementations of the PhotoStorage port.
//!
//! - **LocalPhotoStorage** - photos as files under a base directory

mod local_photo_storage;

pub use local_photo_storage::LocalPhotoStorage;
