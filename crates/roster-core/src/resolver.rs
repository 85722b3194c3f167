//! # Resolution Engine
//!
//! Implements the Query and Mutation fields of the person contract on top of
//! a `PersonStore` and an `IdGenerator`.
//!
//! | Field         | Method                      | Absence      |
//! |---------------|-----------------------------|--------------|
//! | `personCount` | [`Resolver::person_count`]  | -            |
//! | `allPersons`  | [`Resolver::all_persons`]   | -            |
//! | `findPerson`  | [`Resolver::find_person`]   | `None`       |
//! | `addPerson`   | [`Resolver::add_person`]    | -            |
//! | `editNumber`  | [`Resolver::edit_number`]   | `Ok(None)`   |
//!
//! Reads take `&self`; mutations take `&mut self`. Every check a mutation
//! performs happens before the store is touched, so a failed mutation leaves
//! the store unchanged.

use crate::id::{IdGenerator, UuidGenerator};
use crate::registry::{PersonStore, Registry};
use crate::seed::SeedPerson;
use crate::validate::FieldValidator;
use crate::{Address, NewPerson, Person, PersonId, PhoneFilter, RosterError};
use std::collections::BTreeSet;

/// The resolution engine.
pub struct Resolver<S: PersonStore = Registry> {
    store: S,
    ids: Box<dyn IdGenerator>,
}

impl Resolver<Registry> {
    /// Create a resolver over an empty registry with UUIDv7 ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Registry::new(), Box::new(UuidGenerator::new()))
    }
}

impl Default for Resolver<Registry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PersonStore> Resolver<S> {
    /// Create a resolver over an existing store.
    #[must_use]
    pub fn with_store(store: S, ids: Box<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Build a resolver from seed records, in order.
    ///
    /// Records without an id receive one from `ids`. A repeated name or a
    /// repeated explicit id aborts seeding.
    pub fn from_seed(
        store: S,
        ids: Box<dyn IdGenerator>,
        records: Vec<SeedPerson>,
    ) -> Result<Self, RosterError> {
        let mut resolver = Self::with_store(store, ids);
        let mut seen_ids: BTreeSet<PersonId> =
            resolver.store.iter().map(|p| p.id.clone()).collect();

        for record in records {
            let (new, id) = record.into_parts();
            FieldValidator::validate_new(&new)?;
            resolver.ensure_unique_name(&new.name)?;

            let id = id.unwrap_or_else(|| resolver.ids.next_id());
            if !seen_ids.insert(id.clone()) {
                return Err(RosterError::DuplicateId(id));
            }
            resolver.store.append(Person::from_new(id, new));
        }

        Ok(resolver)
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // QUERY
    // =========================================================================

    /// `personCount`
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.store.count()
    }

    /// `allPersons(phone)`
    ///
    /// Filters on presence of the phone field, not on its content.
    #[must_use]
    pub fn all_persons(&self, phone: Option<PhoneFilter>) -> Vec<Person> {
        match phone {
            None => self.store.all(),
            Some(filter) => self
                .store
                .iter()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect(),
        }
    }

    /// `findPerson(name)`
    #[must_use]
    pub fn find_person(&self, name: &str) -> Option<Person> {
        self.store.find_by_name(name).map(|(_, p)| p.clone())
    }

    /// `Person.address`, short-circuiting on an absent person.
    #[must_use]
    pub fn resolve_address(person: Option<&Person>) -> Option<Address> {
        person.map(Person::address)
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// `addPerson(name, phone, street, city)`
    pub fn add_person(&mut self, new: NewPerson) -> Result<Person, RosterError> {
        FieldValidator::validate_new(&new)?;
        self.ensure_unique_name(&new.name)?;

        let person = Person::from_new(self.ids.next_id(), new);
        self.store.append(person.clone());
        Ok(person)
    }

    /// `editNumber(name, phone)`
    ///
    /// Returns `Ok(None)` when no person has this name, whatever the phone.
    pub fn edit_number(
        &mut self,
        name: &str,
        phone: impl Into<String>,
    ) -> Result<Option<Person>, RosterError> {
        let Some((index, existing)) = self.store.find_by_name(name) else {
            return Ok(None);
        };

        let phone = phone.into();
        FieldValidator::validate_phone(&phone)?;
        let updated = existing.with_phone(phone);
        self.store.replace_at(index, updated.clone())?;
        Ok(Some(updated))
    }

    fn ensure_unique_name(&self, name: &str) -> Result<(), RosterError> {
        if self.store.find_by_name(name).is_some() {
            return Err(RosterError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl<S: PersonStore + std::fmt::Debug> std::fmt::Debug for Resolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
