//! Inbound events as the dialogue sees them, independent of any transport.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ConversationId, Coordinates};

/// Bot commands understood by the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Help,
    Add,
    List,
    Nearest,
    Reset,
    Cancel,
    /// Any other `/word`, kept for logging.
    Unknown(String),
}

impl Command {
    /// Parses a message text that starts with `/`.
    ///
    /// Accepts the `/cmd@botname` form and ignores trailing arguments.
    /// Returns `None` when the text is not a command at all.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "add" => Command::Add,
            "list" => Command::List,
            "nearest" => Command::Nearest,
            "reset" => Command::Reset,
            "cancel" => Command::Cancel,
            _ => Command::Unknown(name),
        })
    }
}

/// One resolution of a photo as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    /// Transport handle used to download the content later.
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u64>,
}

/// Opaque reference to a photo held by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self(file_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Picks the highest-resolution variant of a photo.
///
/// Ties on pixel count are broken by file size, then by position (later wins,
/// transports list sizes in ascending order).
pub fn largest_photo(sizes: &[PhotoSize]) -> Option<PhotoRef> {
    sizes
        .iter()
        .enumerate()
        .max_by_key(|(idx, size)| {
            (
                u64::from(size.width) * u64::from(size.height),
                size.file_size.unwrap_or(0),
                *idx,
            )
        })
        .map(|(_, size)| PhotoRef::new(size.file_id.clone()))
}

/// Answer on the reset confirmation keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationAnswer {
    Yes,
    No,
}

impl ConfirmationAnswer {
    pub const ALL: [ConfirmationAnswer; 2] = [ConfirmationAnswer::Yes, ConfirmationAnswer::No];

    /// Button label, also used verbatim as the callback payload.
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmationAnswer::Yes => "Yes",
            ConfirmationAnswer::No => "No",
        }
    }
}

impl FromStr for ConfirmationAnswer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(ConfirmationAnswer::Yes),
            "No" => Ok(ConfirmationAnswer::No),
            other => Err(format!("unexpected confirmation payload: {other}")),
        }
    }
}

/// What arrived from the user.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Command(Command),
    Text(String),
    Photo(Vec<PhotoSize>),
    Location(Coordinates),
    Callback {
        /// Transport id used to acknowledge the button press.
        callback_id: String,
        data: String,
    },
    /// A message kind the dialogue has no use for (stickers, documents, ...).
    Unsupported,
}

impl InboundEvent {
    /// Classifies free text into a command or a plain text event.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match Command::parse(&text) {
            Some(command) => InboundEvent::Command(command),
            None => InboundEvent::Text(text),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Command(_) => "command",
            InboundEvent::Text(_) => "text",
            InboundEvent::Photo(_) => "photo",
            InboundEvent::Location(_) => "location",
            InboundEvent::Callback { .. } => "callback",
            InboundEvent::Unsupported => "unsupported",
        }
    }
}

/// An event tagged with the conversation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub conversation: ConversationId,
    pub event: InboundEvent,
}

impl Inbound {
    pub fn new(conversation: ConversationId, event: InboundEvent) -> Self {
        Self {
            conversation,
            event,
        }
    }
}
