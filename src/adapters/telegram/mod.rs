//! Telegram Bot API adapters.
//!
//! - **TelegramClient** - typed Bot API calls (JSON and multipart)
//! - **TelegramTransport** - ChatTransport implementation
//! - **TelegramPoller** - `getUpdates` long polling into the dispatcher

pub mod api;
mod client;
mod convert;
mod poller;
mod transport;

pub use client::{BotApiConfig, TelegramClient};
pub use convert::to_inbound;
pub use poller::TelegramPoller;
pub use transport::TelegramTransport;
