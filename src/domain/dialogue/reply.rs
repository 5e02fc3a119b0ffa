//! User-facing texts produced by the dialogue.

use crate::domain::place::MAX_NAME_LENGTH;

/// A message the bot sends back.
///
/// Kept as an enum so tests can assert on intent rather than wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Help,
    Unrecognized,
    Cancelled,
    FlowInProgress,

    // Add flow
    AskName,
    InvalidName,
    NameTooLong,
    AskPhoto,
    ExpectedPhoto,
    AskLocation,
    InvalidCoordinates,
    PlaceSaved,
    SaveFailed,

    // Nearest flow
    NoPlaces,
    AskCurrentLocation,
    ExpectedCurrentLocation,
    Searching,
    NearFound(usize),
    NoneNearby,
    ProviderError(String),

    // Reset
    ConfirmReset,
    PlacesDeleted,
    PlacesKept,

    InternalError,
}

impl Reply {
    pub fn text(&self) -> String {
        match self {
            Reply::Help => concat!(
                "Available commands:\n",
                "/add - add a new place\n",
                "/list - show your saved places\n",
                "/nearest - show your places near you\n",
                "/reset - delete all your saved places\n",
                "/help - show this list"
            )
            .to_string(),
            Reply::Unrecognized => {
                "I don't understand that. Send /help to see the available commands.".to_string()
            }
            Reply::Cancelled => "Cancelled.".to_string(),
            Reply::FlowInProgress => {
                "Finish the current step first or send /cancel to stop.".to_string()
            }
            Reply::AskName => {
                "Send the name of the place or /cancel to stop adding it.".to_string()
            }
            Reply::InvalidName => {
                "Send a valid place name! It must contain at least one letter.".to_string()
            }
            Reply::NameTooLong => format!(
                "The name is too long. Keep it within {} characters.",
                MAX_NAME_LENGTH
            ),
            Reply::AskPhoto => {
                "Now send a photo of the place or /cancel to stop adding it.".to_string()
            }
            Reply::ExpectedPhoto => {
                "That is not a photo. Send a photo of the place or /cancel to stop adding it."
                    .to_string()
            }
            Reply::AskLocation => concat!(
                "Now send the coordinates (for example: 58.391693, 26.359372) ",
                "or the location of the place, or /cancel to stop adding it."
            )
            .to_string(),
            Reply::InvalidCoordinates => {
                "Send valid coordinates! For example: 58.391693, 26.359372.".to_string()
            }
            Reply::PlaceSaved => "OK, the place has been saved.".to_string(),
            Reply::SaveFailed => {
                "Sorry, the place could not be saved. Please start again with /add.".to_string()
            }
            Reply::NoPlaces => {
                "You have no saved places. Use /add to add a new place.".to_string()
            }
            Reply::AskCurrentLocation => {
                "Send your current location or /cancel to stop.".to_string()
            }
            Reply::ExpectedCurrentLocation => {
                "Share your location from the attachment menu or send /cancel to stop."
                    .to_string()
            }
            Reply::Searching => "Looking for places near you...".to_string(),
            Reply::NearFound(1) => "Found 1 of your places nearby.".to_string(),
            Reply::NearFound(count) => format!("Found {} of your places nearby.", count),
            Reply::NoneNearby => "None of your places are nearby.".to_string(),
            Reply::ProviderError(status) => {
                format!("Sorry, something went wrong. Error: {}", status)
            }
            Reply::ConfirmReset => {
                "Are you sure you want to delete all your saved places?".to_string()
            }
            Reply::PlacesDeleted => "Your saved places have been deleted!".to_string(),
            Reply::PlacesKept => "OK, your places stay where they are.".to_string(),
            Reply::InternalError => {
                "Something went wrong on our side. Please try again.".to_string()
            }
        }
    }
}
