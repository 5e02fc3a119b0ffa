//! In-progress place record assembled across the add flow.

use crate::domain::foundation::Coordinates;

use super::PhotoRef;

/// Partially collected place. Fields fill in one turn at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDraft {
    pub name: Option<String>,
    pub photo: Option<PhotoRef>,
    pub coordinates: Option<Coordinates>,
}

impl PlaceDraft {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.photo.is_none() && self.coordinates.is_none()
    }

    /// Returns the finished draft once every field is present.
    pub fn complete(&self) -> Option<CompletedDraft> {
        Some(CompletedDraft {
            name: self.name.clone()?,
            photo: self.photo.clone()?,
            coordinates: self.coordinates?,
        })
    }
}

/// A draft with every field present, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDraft {
    pub name: String,
    pub photo: PhotoRef,
    pub coordinates: Coordinates,
}
