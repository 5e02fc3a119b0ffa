//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, coordinates, errors, state machine trait)
//! - `dialogue` - Per-conversation state machine driving the add and nearest flows
//! - `place` - Saved place aggregate
//! - `nearest` - Distance classification and nearest-place outcome reduction

pub mod dialogue;
pub mod foundation;
pub mod nearest;
pub mod place;
