//! Recording chat transport for tests.
//!
//! Keeps every outbound operation in order and serves photo downloads from
//! memory. Downloads of unknown photos return the file id's bytes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::domain::dialogue::{ConfirmationAnswer, PhotoRef};
use crate::domain::foundation::{ConversationId, Coordinates};
use crate::ports::{ChatTransport, MessageId, TransportError};

/// One recorded outbound operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat: ConversationId,
        message: MessageId,
        text: String,
    },
    Edit {
        chat: ConversationId,
        message: MessageId,
        text: String,
    },
    Location {
        chat: ConversationId,
        coordinates: Coordinates,
    },
    Photo {
        chat: ConversationId,
        photo: Vec<u8>,
        caption: String,
    },
    Confirmation {
        chat: ConversationId,
        message: MessageId,
        text: String,
        answers: Vec<ConfirmationAnswer>,
    },
    CallbackAck {
        callback_id: String,
    },
}

impl Sent {
    /// Text shown to the user, if the operation carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } | Sent::Edit { text, .. } | Sent::Confirmation { text, .. } => {
                Some(text)
            }
            Sent::Photo { caption, .. } => Some(caption),
            Sent::Location { .. } | Sent::CallbackAck { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct Recording {
    sent: Vec<Sent>,
    next_message_id: i64,
    photos: HashMap<String, Vec<u8>>,
    broken_photos: HashSet<String>,
}

/// In-memory ChatTransport that records what the bot sends.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content served for a photo file id.
    pub fn with_photo(self, file_id: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.photos.insert(file_id.into(), content.into());
        }
        self
    }

    /// Make downloads of this file id fail.
    pub fn with_broken_photo(self, file_id: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.broken_photos.insert(file_id.into());
        }
        self
    }

    /// Every recorded operation, oldest first.
    pub fn sent(&self) -> Vec<Sent> {
        self.inner
            .lock()
            .map(|inner| inner.sent.clone())
            .unwrap_or_default()
    }

    /// Texts of the recorded operations, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .iter()
            .filter_map(|sent| sent.text().map(str::to_string))
            .collect()
    }

    /// Most recent user-visible text.
    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sent.clear();
        }
    }

    fn record(&self, build: impl FnOnce(MessageId) -> Sent) -> Result<MessageId, TransportError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| TransportError::Network("recording lock poisoned".to_string()))?;
        inner.next_message_id += 1;
        let id = MessageId::new(inner.next_message_id);
        inner.sent.push(build(id));
        Ok(id)
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat: ConversationId,
        text: &str,
    ) -> Result<MessageId, TransportError> {
        self.record(|message| Sent::Text {
            chat,
            message,
            text: text.to_string(),
        })
    }

    async fn edit_text(
        &self,
        chat: ConversationId,
        message: MessageId,
        text: &str,
    ) -> Result<(), TransportError> {
        self.record(|_| Sent::Edit {
            chat,
            message,
            text: text.to_string(),
        })?;
        Ok(())
    }

    async fn send_location(
        &self,
        chat: ConversationId,
        coordinates: Coordinates,
    ) -> Result<(), TransportError> {
        self.record(|_| Sent::Location { chat, coordinates })?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ConversationId,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.record(|_| Sent::Photo {
            chat,
            photo,
            caption: caption.to_string(),
        })?;
        Ok(())
    }

    async fn send_confirmation(
        &self,
        chat: ConversationId,
        text: &str,
        answers: &[ConfirmationAnswer],
    ) -> Result<MessageId, TransportError> {
        self.record(|message| Sent::Confirmation {
            chat,
            message,
            text: text.to_string(),
            answers: answers.to_vec(),
        })
    }

    async fn acknowledge_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.record(|_| Sent::CallbackAck {
            callback_id: callback_id.to_string(),
        })?;
        Ok(())
    }

    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| TransportError::Network("recording lock poisoned".to_string()))?;
        if inner.broken_photos.contains(photo.as_str()) {
            return Err(TransportError::Api {
                code: 400,
                description: format!("Bad Request: invalid file_id {}", photo.as_str()),
            });
        }
        Ok(inner
            .photos
            .get(photo.as_str())
            .cloned()
            .unwrap_or_else(|| photo.as_str().as_bytes().to_vec()))
    }
}
