//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of one user's chat.
///
/// Wraps the transport's chat id. Keys both the session store and the
/// place repository; one identity carries at most one dialogue at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(i64);

impl ConversationId {
    /// Creates a ConversationId from the transport chat id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw chat id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a saved place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(Uuid);

impl PlaceId {
    /// Creates a new random PlaceId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PlaceId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_displays_raw_chat_id() {
        assert_eq!(ConversationId::new(-100123).to_string(), "-100123");
    }

    #[test]
    fn conversation_id_parses_from_string() {
        let id: ConversationId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert!("forty-two".parse::<ConversationId>().is_err());
    }

    #[test]
    fn place_ids_are_unique() {
        assert_ne!(PlaceId::new(), PlaceId::new());
    }

    #[test]
    fn place_id_roundtrips_through_string() {
        let id = PlaceId::new();
        let parsed: PlaceId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
