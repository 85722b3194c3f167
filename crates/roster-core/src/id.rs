//! # Identifier Generator
//!
//! Issues the opaque `id` of each newly created person.
//!
//! Identifiers are UUIDv7: the leading 48 bits are a millisecond timestamp,
//! so ids sort by creation time, and the random tail keeps them unique
//! across processes and against ids supplied by seed data.

use crate::PersonId;
use uuid::Uuid;

/// Source of fresh person identifiers.
///
/// Implementations must never return the same id twice in a process.
pub trait IdGenerator: Send + Sync {
    /// Issue a new identifier.
    fn next_id(&self) -> PersonId;
}

/// Time-ordered UUIDv7 generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> PersonId {
        PersonId(Uuid::now_v7().hyphenated().to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn ids_are_unique() {
        let ids = UuidGenerator::new();
        let issued: BTreeSet<_> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 1000);
    }

    #[test]
    fn ids_are_hyphenated_v7() {
        let id = UuidGenerator::new().next_id();
        let parsed = Uuid::parse_str(id.as_str()).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 7);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn ids_are_time_ordered() {
        let ids = UuidGenerator::new();
        let first = ids.next_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = ids.next_id();
        assert!(first < second);
    }
}
