//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - per-conversation dialogue sessions
//! - `PlaceRepository` - durable users and places
//! - `PhotoStorage` - photo files, partitioned per conversation
//! - `DistanceProvider` - live origin/destination distance queries
//! - `ChatTransport` - outbound chat messages

mod chat_transport;
mod distance_provider;
mod photo_storage;
mod place_repository;
mod session_store;

pub use chat_transport::{ChatTransport, MessageId, TransportError};
pub use distance_provider::{DistanceError, DistanceProvider};
pub use photo_storage::{PhotoStorage, StorageError};
pub use place_repository::PlaceRepository;
pub use session_store::{SessionStore, SessionStoreError};
