//! Session identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an authenticated session.
///
/// Session IDs are random version-4 UUIDs and display in the standard
/// hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = crate::error::StatehubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|_| crate::error::StatehubError::InvalidId(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1_000 {
            let id = SessionId::new();
            assert!(ids.insert(id), "Duplicate ID generated: {}", id);
        }
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = SessionId::new();
        let s = id.to_string();
        assert_eq!(s.len(), 36);
        assert_eq!(s.matches('-').count(), 4);
    }

    #[test]
    fn test_roundtrip() {
        let original = SessionId::new();
        let parsed: SessionId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("not-a-uuid".parse::<SessionId>().is_err());
        assert!("".parse::<SessionId>().is_err());
        // Truncated
        assert!("123e4567-e89b-12d3-a456".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_parse_error_is_invalid_id() {
        let err = "bogus".parse::<SessionId>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::StatehubError::InvalidId(_)
        ));
    }

    #[test]
    fn test_hash_eq() {
        let raw = Uuid::new_v4();
        let id1 = SessionId::from_uuid(raw);
        let id2 = SessionId::from_uuid(raw);

        assert_eq!(id1, id2);

        let mut set = HashSet::new();
        set.insert(id1);
        assert!(set.contains(&id2));
    }
}
