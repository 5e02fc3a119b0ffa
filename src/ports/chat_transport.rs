//! Chat Transport Port - everything the bot sends back to a chat.
//!
//! Inbound delivery is not part of this port: transports turn their updates
//! into `domain::dialogue::Inbound` values and hand them to the dispatcher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::dialogue::{ConfirmationAnswer, PhotoRef};
use crate::domain::foundation::{ConversationId, Coordinates};

/// Transport id of a sent message, used for edit-in-place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by a chat transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transport request timed out")]
    Timeout,

    #[error("Transport API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Invalid transport response: {0}")]
    InvalidResponse(String),
}

/// Port for outbound chat operations.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a plain text message.
    async fn send_text(
        &self,
        chat: ConversationId,
        text: &str,
    ) -> Result<MessageId, TransportError>;

    /// Replace the text of a message sent earlier.
    async fn edit_text(
        &self,
        chat: ConversationId,
        message: MessageId,
        text: &str,
    ) -> Result<(), TransportError>;

    /// Send a location marker.
    async fn send_location(
        &self,
        chat: ConversationId,
        coordinates: Coordinates,
    ) -> Result<(), TransportError>;

    /// Send a photo with a caption.
    async fn send_photo(
        &self,
        chat: ConversationId,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TransportError>;

    /// Send a question with one inline button per answer.
    ///
    /// Each button's callback payload is the answer's label.
    async fn send_confirmation(
        &self,
        chat: ConversationId,
        text: &str,
        answers: &[ConfirmationAnswer],
    ) -> Result<MessageId, TransportError>;

    /// Tell the transport a button press was handled.
    async fn acknowledge_callback(&self, callback_id: &str) -> Result<(), TransportError>;

    /// Fetch the binary content behind a photo reference.
    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError>;
}
