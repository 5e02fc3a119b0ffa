//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the place keeper domain.

mod coordinates;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use coordinates::Coordinates;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationId, PlaceId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
