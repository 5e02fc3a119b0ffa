//! Place repository port.
//!
//! Durable store of confirmed places and their owning user rows.
//!
//! # Design
//!
//! - **User rows are implicit**: created on the first save, removed by `delete_all`
//! - **Atomic writes**: `save` and `delete_all` each run in one transaction
//! - **Owner-scoped**: every query is keyed by the conversation identity

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::place::Place;

/// Repository port for Place persistence.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Save a new place, creating the owner's user row if missing.
    ///
    /// Either both rows commit or neither does.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, place: &Place) -> Result<(), DomainError>;

    /// Most recent places first, at most `limit` of them.
    async fn list_recent(
        &self,
        owner: ConversationId,
        limit: u32,
    ) -> Result<Vec<Place>, DomainError>;

    /// Every place of the owner in creation order (oldest first).
    ///
    /// This is the iteration order of the nearest-place query.
    async fn list_all(&self, owner: ConversationId) -> Result<Vec<Place>, DomainError>;

    /// Number of places the owner has saved.
    async fn count(&self, owner: ConversationId) -> Result<u64, DomainError>;

    /// Delete the owner's user row together with all its places.
    ///
    /// Returns the number of places removed. Deleting an unknown owner is a no-op.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; nothing is deleted in that case
    async fn delete_all(&self, owner: ConversationId) -> Result<u64, DomainError>;
}
