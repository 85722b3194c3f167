//! # roster-core
//!
//! The resolution engine for Roster - THE ENGINE.
//!
//! This crate holds a registry of person records and resolves the
//! Query/Mutation contract against it:
//!
//! - `personCount`, `allPersons(phone)`, `findPerson(name)` (queries)
//! - `addPerson(name, phone, street, city)`, `editNumber(name, phone)` (mutations)
//! - `Person.address` (computed on every read, never stored)
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Names are unique across the registry; `addPerson` enforces it
//! - Ids are assigned once and survive every update
//! - "Not found" is `None`, never an error

// =============================================================================
// MODULES
// =============================================================================

pub mod id;
pub mod primitives;
pub mod registry;
pub mod resolver;
pub mod seed;
pub mod types;
pub mod validate;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use id::{IdGenerator, UuidGenerator};
pub use registry::{PersonStore, Registry};
pub use resolver::Resolver;
pub use seed::{SeedFormat, SeedPerson, demo_seed};
pub use types::{Address, NewPerson, Person, PersonId, PhoneFilter, RosterError};
pub use validate::FieldValidator;
