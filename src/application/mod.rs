//! Application layer - coordinates the domain with the ports.
//!
//! - `PlaceBot` handles one inbound event end to end
//! - `NearestPlaceMatcher` runs distance queries for the nearest flow
//! - `Dispatcher` serialises events per conversation

mod dispatcher;
mod nearest_matcher;
mod place_bot;

pub use dispatcher::{Dispatcher, DEFAULT_IDLE_TIMEOUT};
pub use nearest_matcher::NearestPlaceMatcher;
pub use place_bot::{BotError, PlaceBot, LIST_LIMIT};
