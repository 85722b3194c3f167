//! End-to-end scenarios against the resolution engine.

use roster_core::{
    Address, NewPerson, PhoneFilter, Registry, Resolver, RosterError, SeedPerson, UuidGenerator,
    demo_seed,
};

fn seeded(records: Vec<SeedPerson>) -> Resolver {
    Resolver::from_seed(Registry::new(), Box::new(UuidGenerator::new()), records).expect("seed")
}

#[test]
fn single_seed_walkthrough() {
    let mut resolver = seeded(vec![SeedPerson::new("A", "s1", "c1")]);

    let without_phone = resolver.all_persons(Some(PhoneFilter::No));
    assert_eq!(without_phone.len(), 1);
    assert_eq!(without_phone[0].name, "A");
    let a_id = without_phone[0].id.clone();

    let b = resolver
        .add_person(NewPerson::new("B", "s2", "c2").phone("111"))
        .expect("add B");
    assert_eq!(b.phone.as_deref(), Some("111"));
    assert_eq!(resolver.person_count(), 2);

    let err = resolver
        .add_person(NewPerson::new("A", "s3", "c3"))
        .expect_err("duplicate A");
    assert_eq!(
        err,
        RosterError::DuplicateName {
            name: "A".to_string()
        }
    );
    assert_eq!(resolver.person_count(), 2);

    let a = resolver
        .edit_number("A", "999")
        .expect("edit")
        .expect("A exists");
    assert_eq!(a.phone.as_deref(), Some("999"));
    assert_eq!(a.id, a_id);

    assert!(resolver.find_person("Z").is_none());
}

#[test]
fn seeded_ids_never_collide_with_generated_ones() {
    let mut resolver = seeded(demo_seed());
    let created = resolver
        .add_person(NewPerson::new("Nova", "1 Star Rd", "Anytown"))
        .expect("add");

    let ids: std::collections::BTreeSet<_> =
        resolver.all_persons(None).into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.contains(&created.id));
}

#[test]
fn demo_seed_filters() {
    let resolver = seeded(demo_seed());

    let with_phone: Vec<_> = resolver
        .all_persons(Some(PhoneFilter::Yes))
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(with_phone, vec!["Midu", "Youssef"]);

    let without_phone: Vec<_> = resolver
        .all_persons(Some(PhoneFilter::No))
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(without_phone, vec!["Itzi"]);
}

#[test]
fn address_of_found_person() {
    let mut resolver = Resolver::new();
    resolver
        .add_person(NewPerson::new("Homer", "5 Elm", "Springfield"))
        .expect("add");

    let homer = resolver.find_person("Homer");
    assert_eq!(
        Resolver::<Registry>::resolve_address(homer.as_ref()),
        Some(Address {
            street: "5 Elm".to_string(),
            city: "Springfield".to_string(),
        })
    );
    assert_eq!(
        Resolver::<Registry>::resolve_address(resolver.find_person("Marge").as_ref()),
        None
    );
}

#[test]
fn snapshot_does_not_follow_later_edits() {
    let mut resolver = seeded(demo_seed());
    let snapshot = resolver.all_persons(None);

    resolver.edit_number("Itzi", "000").expect("edit");

    assert!(snapshot.iter().all(|p| p.name != "Itzi" || p.phone.is_none()));
    assert_eq!(
        resolver.find_person("Itzi").and_then(|p| p.phone),
        Some("000".to_string())
    );
}
