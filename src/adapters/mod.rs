//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `session` - dialogue session stores
//! - `memory` / `postgres` - place repositories
//! - `storage` - photo files on local disk
//! - `maps` - distance providers (Google, mock)
//! - `telegram` - Bot API transport and long polling
//! - `chat` - recording transport for tests

pub mod chat;
pub mod maps;
pub mod memory;
pub mod postgres;
pub mod session;
pub mod storage;
pub mod telegram;

pub use chat::RecordingTransport;
pub use maps::{GoogleDistanceMatrix, GoogleMapsConfig, MockDistanceProvider};
pub use memory::InMemoryPlaceRepository;
pub use postgres::PostgresPlaceRepository;
pub use session::InMemorySessionStore;
pub use storage::LocalPhotoStorage;
pub use telegram::{BotApiConfig, TelegramClient, TelegramPoller, TelegramTransport};
