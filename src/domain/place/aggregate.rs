//! Place aggregate entity.
//!
//! A place is a named, photographed coordinate owned by one conversation.
//! Places only come into existence from a completed dialogue draft.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ConversationId, Coordinates, DomainError, ErrorCode, PlaceId, Timestamp,
};

/// Maximum length for a place name (matches the persisted column width).
pub const MAX_NAME_LENGTH: usize = 100;

/// Saved place.
///
/// # Invariants
///
/// - `name` is 1-100 characters after trimming
/// - `photo` points at a file written before the place was persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    id: PlaceId,
    owner: ConversationId,
    name: String,
    photo: String,
    coordinates: Coordinates,
    created_at: Timestamp,
}

impl Place {
    /// Create a new place stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is empty or too long, or the photo path is empty
    pub fn new(
        owner: ConversationId,
        name: impl Into<String>,
        photo: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        Self::validate_name(&name)?;

        let photo = photo.into();
        if photo.is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Place photo reference cannot be empty",
            ));
        }

        Ok(Self {
            id: PlaceId::new(),
            owner,
            name,
            photo,
            coordinates,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a place from persistence (no validation).
    pub fn reconstitute(
        id: PlaceId,
        owner: ConversationId,
        name: String,
        photo: String,
        coordinates: Coordinates,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            photo,
            coordinates,
            created_at,
        }
    }

    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    pub fn owner(&self) -> &ConversationId {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored photo location as handed out by the photo storage.
    pub fn photo(&self) -> &str {
        &self.photo
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Place name cannot be empty",
            ));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Place name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> Coordinates {
        Coordinates::new(40.785, -73.968).unwrap()
    }

    #[test]
    fn new_place_trims_name() {
        let place = Place::new(ConversationId::new(7), "  Central Park ", "user_7/a.jpg", park())
            .unwrap();
        assert_eq!(place.name(), "Central Park");
        assert_eq!(place.owner().as_i64(), 7);
        assert_eq!(place.coordinates(), &park());
    }

    #[test]
    fn rejects_blank_name() {
        let err = Place::new(ConversationId::new(7), "   ", "user_7/a.jpg", park()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn rejects_name_longer_than_column() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(Place::new(ConversationId::new(7), name, "user_7/a.jpg", park()).is_err());
    }

    #[test]
    fn accepts_name_at_limit_counting_chars_not_bytes() {
        let name = "ж".repeat(MAX_NAME_LENGTH);
        assert!(Place::new(ConversationId::new(7), name, "user_7/a.jpg", park()).is_ok());
    }

    #[test]
    fn rejects_empty_photo_reference() {
        assert!(Place::new(ConversationId::new(7), "Home", "", park()).is_err());
    }
}
