//! # Registry
//!
//! The ordered, in-memory store of person records.
//!
//! This module implements the `PersonStore` trait. The registry is a plain
//! storage primitive: it keeps insertion order and never re-checks
//! uniqueness. Enforcing invariants is the resolver's job.

use crate::{Person, RosterError};

// =============================================================================
// PERSONSTORE TRAIT
// =============================================================================

/// The PersonStore trait defines the storage operations the resolver needs.
///
/// Positions are stable between a `find_by_name` and a `replace_at` made
/// under the same `&mut` borrow, since the store never removes records.
pub trait PersonStore {
    /// First record whose name equals `name` exactly, with its position.
    fn find_by_name(&self, name: &str) -> Option<(usize, &Person)>;

    /// Add a record at the end.
    fn append(&mut self, person: Person);

    /// Replace the record at `index`.
    fn replace_at(&mut self, index: usize, person: Person) -> Result<(), RosterError>;

    /// Number of records.
    fn count(&self) -> usize;

    /// Iterate over records in insertion order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Person> + '_>;

    /// Owned snapshot of every record, in insertion order.
    ///
    /// Later mutations are not reflected in the returned vector.
    fn all(&self) -> Vec<Person> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// REGISTRY IMPLEMENTATION
// =============================================================================

/// Vector-backed person store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    persons: Vec<Person>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonStore for Registry {
    fn find_by_name(&self, name: &str) -> Option<(usize, &Person)> {
        self.persons.iter().enumerate().find(|(_, p)| p.name == name)
    }

    fn append(&mut self, person: Person) {
        self.persons.push(person);
    }

    fn replace_at(&mut self, index: usize, person: Person) -> Result<(), RosterError> {
        let len = self.persons.len();
        let slot = self
            .persons
            .get_mut(index)
            .ok_or(RosterError::IndexOutOfBounds { index, len })?;
        *slot = person;
        Ok(())
    }

    fn count(&self) -> usize {
        self.persons.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Person> + '_> {
        Box::new(self.persons.iter())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewPerson, PersonId};

    fn person(id: &str, name: &str) -> Person {
        Person::from_new(PersonId::new(id), NewPerson::new(name, "street", "city"))
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut registry = Registry::new();
        registry.append(person("1", "Zed"));
        registry.append(person("2", "Amy"));

        let names: Vec<_> = registry.all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn find_by_name_is_exact_and_case_sensitive() {
        let mut registry = Registry::new();
        registry.append(person("1", "Ada"));

        assert_eq!(registry.find_by_name("Ada").map(|(i, _)| i), Some(0));
        assert!(registry.find_by_name("ada").is_none());
        assert!(registry.find_by_name("Ad").is_none());
    }

    #[test]
    fn find_by_name_returns_first_match() {
        // The registry does not enforce uniqueness itself.
        let mut registry = Registry::new();
        registry.append(person("1", "Ada"));
        registry.append(person("2", "Ada"));

        let (index, found) = registry.find_by_name("Ada").expect("found");
        assert_eq!(index, 0);
        assert_eq!(found.id, PersonId::new("1"));
    }

    #[test]
    fn replace_at_swaps_record() {
        let mut registry = Registry::new();
        registry.append(person("1", "Ada"));

        let updated = registry.all()[0].with_phone("555");
        registry.replace_at(0, updated.clone()).expect("replace");

        assert_eq!(registry.all(), vec![updated]);
    }

    #[test]
    fn replace_at_rejects_stale_index() {
        let mut registry = Registry::new();
        let err = registry
            .replace_at(3, person("1", "Ada"))
            .expect_err("out of bounds");
        assert_eq!(err, RosterError::IndexOutOfBounds { index: 3, len: 0 });
    }

    #[test]
    fn all_is_a_snapshot() {
        let mut registry = Registry::new();
        registry.append(person("1", "Ada"));

        let snapshot = registry.all();
        registry.append(person("2", "Bob"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.count(), 2);
    }
}
