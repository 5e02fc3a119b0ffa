//! In-Memory Session Store Adapter
//!
//! Sessions are process-local and are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::Session;
use crate::domain::foundation::ConversationId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for dialogue sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ConversationId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations with a live session (useful for tests)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, conversation: ConversationId) -> Result<Session, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&conversation).cloned().unwrap_or_default())
    }

    async fn save(
        &self,
        conversation: ConversationId,
        session: Session,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if session.is_pristine() {
            sessions.remove(&conversation);
        } else {
            sessions.insert(conversation, session);
        }
        Ok(())
    }

    async fn clear(&self, conversation: ConversationId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&conversation);
        Ok(())
    }
}
