//! Place module - saved places owned by a conversation.

mod aggregate;

pub use aggregate::{Place, MAX_NAME_LENGTH};
