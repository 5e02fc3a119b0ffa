//! Session Store Port - where dialogue sessions live between events.

use async_trait::async_trait;

use crate::domain::dialogue::Session;
use crate::domain::foundation::ConversationId;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port holding one dialogue session per conversation.
///
/// Lifecycle: an entry appears with the first event that leaves a session
/// non-pristine and disappears once the session is idle with no draft
/// again (cancel, completion, reset).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session, or a fresh idle one if none is stored.
    async fn load(&self, conversation: ConversationId) -> Result<Session, SessionStoreError>;

    /// Store the session. Pristine sessions are dropped instead.
    async fn save(
        &self,
        conversation: ConversationId,
        session: Session,
    ) -> Result<(), SessionStoreError>;

    /// Forget the session.
    async fn clear(&self, conversation: ConversationId) -> Result<(), SessionStoreError>;
}
