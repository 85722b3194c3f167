//! # Property-Based Tests
//!
//! Invariants of the resolution engine, checked with proptest.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use roster_core::{NewPerson, PhoneFilter, Resolver, RosterError};
use std::collections::BTreeSet;

/// Names drawn from a small alphabet so collisions are frequent.
fn name() -> impl Strategy<Value = String> {
    "[a-c]{1,2}"
}

/// Phones: absent, empty, or digits.
fn phone() -> impl Strategy<Value = Option<String>> {
    option::of(prop_oneof![Just(String::new()), "[0-9]{3}"])
}

fn new_person(name: String, phone: Option<String>) -> NewPerson {
    NewPerson {
        name,
        phone,
        street: "street".to_string(),
        city: "city".to_string(),
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A repeated name is rejected and the count does not grow.
    #[test]
    fn names_stay_unique(names in vec(name(), 0..40)) {
        let mut resolver = Resolver::new();
        let mut seen = BTreeSet::new();

        for n in names {
            let before = resolver.person_count();
            let result = resolver.add_person(new_person(n.clone(), None));

            if seen.insert(n.clone()) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(resolver.person_count(), before + 1);
            } else {
                prop_assert_eq!(result, Err(RosterError::DuplicateName { name: n }));
                prop_assert_eq!(resolver.person_count(), before);
            }
        }

        prop_assert_eq!(resolver.person_count(), seen.len());
    }

    /// Editing the phone never changes the id.
    #[test]
    fn id_survives_edits(phones in vec("[0-9]{0,6}", 1..10)) {
        let mut resolver = Resolver::new();
        let created = resolver
            .add_person(new_person("Ada".to_string(), None))
            .expect("add");

        for p in phones {
            let edited = resolver.edit_number("Ada", p.clone()).expect("edit").expect("found");
            prop_assert_eq!(&edited.id, &created.id);
            prop_assert_eq!(edited.phone, Some(p));
        }

        prop_assert_eq!(resolver.find_person("Ada").map(|p| p.id), Some(created.id));
    }

    /// YES and NO partition the unfiltered result.
    #[test]
    fn phone_filter_partitions(people in vec((name(), phone()), 0..30)) {
        let mut resolver = Resolver::new();
        for (n, p) in people {
            let _ = resolver.add_person(new_person(n, p));
        }

        let all: BTreeSet<_> = resolver.all_persons(None).into_iter().map(|p| p.id).collect();
        let yes: BTreeSet<_> = resolver
            .all_persons(Some(PhoneFilter::Yes))
            .into_iter()
            .map(|p| p.id)
            .collect();
        let no: BTreeSet<_> = resolver
            .all_persons(Some(PhoneFilter::No))
            .into_iter()
            .map(|p| p.id)
            .collect();

        prop_assert!(yes.is_disjoint(&no));
        let union: BTreeSet<_> = yes.union(&no).cloned().collect();
        prop_assert_eq!(union, all);
    }

    /// Editing an unknown name returns None and changes nothing.
    #[test]
    fn unknown_edit_is_noop(people in vec((name(), phone()), 0..20), phone in "[0-9]{3}") {
        let mut resolver = Resolver::new();
        for (n, p) in people {
            let _ = resolver.add_person(new_person(n, p));
        }
        let before = resolver.store().clone();

        // Generated names never contain 'z'.
        let result = resolver.edit_number("zz-missing", phone);

        prop_assert_eq!(result, Ok(None));
        prop_assert_eq!(resolver.store(), &before);
    }

    /// Address is exactly the record's street and city.
    #[test]
    fn address_mirrors_street_and_city(street in "[a-z0-9 ]{1,20}", city in "[a-z]{1,20}") {
        let mut resolver = Resolver::new();
        let person = resolver
            .add_person(NewPerson::new("Ada", street.clone(), city.clone()))
            .expect("add");

        let address = person.address();
        prop_assert_eq!(address.street, street);
        prop_assert_eq!(address.city, city);
    }
}
