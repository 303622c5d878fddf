//! Unique identifiers for quiz entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a problem
///
/// Problems are created once per quiz question and addressed by id for the
/// whole session: answer state, focus, locking, and recorded grades all key
/// off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(Uuid);

impl ProblemId {
    /// Creates a new random problem ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a problem ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProblemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Problem({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_id_creation() {
        let id1 = ProblemId::new();
        let id2 = ProblemId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_problem_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ProblemId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_problem_id_display() {
        let id = ProblemId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("Problem("));
    }

    #[test]
    fn test_problem_id_serialization() {
        let id = ProblemId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ProblemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
