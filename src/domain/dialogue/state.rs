//! Dialogue state machine.
//!
//! Defines the per-conversation states of the place dialogue and which
//! transitions between them are legal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a conversation currently is in a multi-step flow.
///
/// - `Idle`: no flow armed, stateless commands only
/// - `AwaitingName` / `AwaitingPhoto` / `AwaitingLocation`: the `/add` flow
/// - `AwaitingNearestLocation`: the `/nearest` flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Idle,
    AwaitingName,
    AwaitingPhoto,
    AwaitingLocation,
    AwaitingNearestLocation,
}

impl DialogueState {
    pub const ALL: [DialogueState; 5] = [
        DialogueState::Idle,
        DialogueState::AwaitingName,
        DialogueState::AwaitingPhoto,
        DialogueState::AwaitingLocation,
        DialogueState::AwaitingNearestLocation,
    ];

    /// Returns true if no multi-step flow is armed.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            // Flows start from idle
            (Idle, AwaitingName) |
            (Idle, AwaitingNearestLocation) |
            // The add flow moves forward one step at a time
            (AwaitingName, AwaitingPhoto) |
            (AwaitingPhoto, AwaitingLocation) |
            // Completion, cancel and reset always land on idle
            (_, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Idle => vec![Idle, AwaitingName, AwaitingNearestLocation],
            AwaitingName => vec![AwaitingPhoto, Idle],
            AwaitingPhoto => vec![AwaitingLocation, Idle],
            AwaitingLocation => vec![Idle],
            AwaitingNearestLocation => vec![Idle],
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogueState::Idle => "idle",
            DialogueState::AwaitingName => "awaiting_name",
            DialogueState::AwaitingPhoto => "awaiting_photo",
            DialogueState::AwaitingLocation => "awaiting_location",
            DialogueState::AwaitingNearestLocation => "awaiting_nearest_location",
        };
        write!(f, "{}", s)
    }
}
