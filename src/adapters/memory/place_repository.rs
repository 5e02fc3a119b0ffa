//! In-memory implementation of PlaceRepository.
//!
//! Mirrors the relational layout: a map entry plays the user row, and the
//! places vector keeps insertion order, which is creation order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::place::Place;
use crate::ports::PlaceRepository;

/// In-memory place repository for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlaceRepository {
    users: Arc<RwLock<HashMap<ConversationId, Vec<Place>>>>,
}

impl InMemoryPlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a user row exists for the owner.
    pub async fn has_user(&self, owner: ConversationId) -> bool {
        self.users.read().await.contains_key(&owner)
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn save(&self, place: &Place) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.entry(*place.owner()).or_default().push(place.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        owner: ConversationId,
        limit: u32,
    ) -> Result<Vec<Place>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(&owner)
            .map(|places| {
                places
                    .iter()
                    .rev()
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_all(&self, owner: ConversationId) -> Result<Vec<Place>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&owner).cloned().unwrap_or_default())
    }

    async fn count(&self, owner: ConversationId) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&owner).map(|places| places.len() as u64).unwrap_or(0))
    }

    async fn delete_all(&self, owner: ConversationId) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        Ok(users
            .remove(&owner)
            .map(|places| places.len() as u64)
            .unwrap_or(0))
    }
}
