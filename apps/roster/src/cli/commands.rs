//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::RosterConfig;
use roster_core::{
    Person, PhoneFilter, Registry, Resolver, RosterError, UuidGenerator, demo_seed, seed,
};

// =============================================================================
// SEEDING
// =============================================================================

/// Build a resolver from the configured seed, or the demo population.
///
/// Any seed error is fatal; the server never starts half-seeded.
pub fn load_resolver(config: &RosterConfig) -> Result<Resolver, RosterError> {
    let records = match &config.seed.path {
        Some(path) => {
            tracing::info!("Loading seed from {:?}", path);
            seed::load_file(path)?
        }
        None => {
            tracing::info!("No seed configured, using demo population");
            demo_seed()
        }
    };

    let count = records.len();
    let resolver = Resolver::from_seed(Registry::new(), Box::new(UuidGenerator::new()), records)?;
    tracing::info!(event = "seeded", persons = count, "Registry seeded");
    Ok(resolver)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &RosterConfig, quiet: bool) -> Result<(), RosterError> {
    let resolver = load_resolver(config)?;
    let addr = config.server.addr();

    if !quiet {
        println!("Roster Server v{} Starting...", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Configuration:");
        println!("  Address: {}", addr);
        match &config.seed.path {
            Some(path) => println!("  Seed:    {:?}", path),
            None => println!("  Seed:    (demo population)"),
        }
        println!("  Persons: {}", resolver.person_count());
        println!();
        println!("Endpoints:");
        println!("  POST /query    - personCount, allPersons, findPerson");
        println!("  POST /mutation - addPerson, editNumber");
        println!("  GET  /status   - Registry counts");
        println!("  GET  /health   - Health check");
        println!();
        println!("Press Ctrl+C to stop");
        println!();
    }

    api::run_server(&addr, resolver, &config.http).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show registry counts.
pub fn cmd_status(config: &RosterConfig, json_mode: bool) -> Result<(), RosterError> {
    let resolver = load_resolver(config)?;
    let total = resolver.person_count();
    let with_phone = resolver.all_persons(Some(PhoneFilter::Yes)).len();
    let without_phone = total.saturating_sub(with_phone);

    if json_mode {
        let output = serde_json::json!({
            "person_count": total,
            "with_phone": with_phone,
            "without_phone": without_phone,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Roster Status");
    println!("=============");
    println!("Persons:       {}", total);
    println!("With phone:    {}", with_phone);
    println!("Without phone: {}", without_phone);

    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List persons, optionally filtered by phone presence.
pub fn cmd_list(
    config: &RosterConfig,
    json_mode: bool,
    phone: Option<PhoneFilter>,
) -> Result<(), RosterError> {
    let resolver = load_resolver(config)?;
    let persons = resolver.all_persons(phone);

    if json_mode {
        let list: Vec<api::PersonJson> = persons.iter().map(api::PersonJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&list).unwrap_or_default());
        return Ok(());
    }

    if persons.is_empty() {
        println!("No persons found");
    }
    for person in &persons {
        println!("{}", format_person(person));
    }

    Ok(())
}

// =============================================================================
// FIND COMMAND
// =============================================================================

/// Look up a person by exact name.
pub fn cmd_find(config: &RosterConfig, json_mode: bool, name: &str) -> Result<(), RosterError> {
    let resolver = load_resolver(config)?;
    let found = resolver.find_person(name);

    if json_mode {
        let json = found.as_ref().map(api::PersonJson::from);
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return Ok(());
    }

    match found {
        Some(person) => println!("{}", format_person(&person)),
        None => println!("No person named '{}'", name),
    }

    Ok(())
}

// =============================================================================
// CHECK-SEED COMMAND
// =============================================================================

/// Validate the configured seed.
pub fn cmd_check_seed(config: &RosterConfig, json_mode: bool) -> Result<(), RosterError> {
    let resolver = load_resolver(config)?;

    if json_mode {
        let output = serde_json::json!({
            "valid": true,
            "person_count": resolver.person_count(),
        });
        println!("{}", serde_json::to_string(&output).unwrap_or_default());
    } else {
        println!("Seed OK: {} persons", resolver.person_count());
    }

    Ok(())
}

/// One-line human rendering of a person.
pub fn format_person(person: &Person) -> String {
    let phone = person.phone.as_deref().unwrap_or("-");
    format!(
        "{:<20} {:<16} {}  [{}]",
        person.name,
        phone,
        person.address(),
        person.id
    )
}

// =============================================================================
// TESTS
// =============================================================================
