//! Dialogue module - the per-conversation state machine.
//!
//! - `state` - the `DialogueState` enum and its transition table
//! - `event` - transport-independent inbound events
//! - `draft` - the place being collected by the add flow
//! - `input` - validation of typed names and coordinates
//! - `reply` - user-facing texts
//! - `session` - the pure step function tying the above together

mod draft;
mod event;
pub mod input;
mod reply;
mod session;
mod state;

pub use draft::{CompletedDraft, PlaceDraft};
pub use event::{
    largest_photo, Command, ConfirmationAnswer, Inbound, InboundEvent, PhotoRef, PhotoSize,
};
pub use reply::Reply;
pub use session::{DialogueContext, Effect, Session};
pub use state::DialogueState;
