//! # Core Type Definitions
//!
//! This module contains the record types of the Roster registry:
//! - Identifiers (`PersonId`)
//! - Stored records (`Person`) and creation input (`NewPerson`)
//! - Computed views (`Address`)
//! - Query arguments (`PhoneFilter`)
//! - Error types (`RosterError`)
//!
//! ## Record Guarantees
//!
//! - `Person::id` is assigned once and carried over by every update
//! - `Address` is never stored; it is rebuilt from `street`/`city` on each read
//! - An absent phone (`None`) is distinct from an empty one (`Some("")`)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Opaque, immutable identifier of a person record.
///
/// Serialized as a plain string so seed files and clients see the raw id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PERSON
// =============================================================================

/// A person record as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl Person {
    /// Build a record from creation input and a freshly issued id.
    #[must_use]
    pub fn from_new(id: PersonId, new: NewPerson) -> Self {
        Self {
            id,
            name: new.name,
            phone: new.phone,
            street: new.street,
            city: new.city,
        }
    }

    /// Build the phone-updated copy of this record.
    ///
    /// Every other field is assigned explicitly so a new field on `Person`
    /// forces this constructor to be revisited.
    #[must_use]
    pub fn with_phone(&self, phone: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: Some(phone.into()),
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }

    /// Whether a phone is present. `Some("")` counts as present.
    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone.is_some()
    }

    /// Resolve the computed address of this record.
    #[must_use]
    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }
}

/// Input of the `addPerson` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl NewPerson {
    /// Create input without a phone.
    #[must_use]
    pub fn new(name: impl Into<String>, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            street: street.into(),
            city: city.into(),
        }
    }

    /// Attach a phone to the input.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

// =============================================================================
// ADDRESS
// =============================================================================

/// Read-only view derived from a person's `street` and `city`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.street, self.city)
    }
}

// =============================================================================
// PHONE FILTER
// =============================================================================

/// The `phone` argument of `allPersons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhoneFilter {
    /// Only records with a phone.
    Yes,
    /// Only records without a phone.
    No,
}

impl PhoneFilter {
    /// Check whether a record passes this filter.
    #[must_use]
    pub fn matches(self, person: &Person) -> bool {
        match self {
            Self::Yes => person.has_phone(),
            Self::No => !person.has_phone(),
        }
    }
}

impl std::str::FromStr for PhoneFilter {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            _ => Err(RosterError::InvalidField {
                field: "phone",
                reason: format!("expected YES or NO, got '{}'", s),
            }),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Roster engine.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// A person with this name already exists.
    #[error("Name must be unique: '{name}' is already registered")]
    DuplicateName { name: String },

    /// An argument violates a field limit.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Seed data reuses an identifier.
    #[error("Duplicate person id: {0}")]
    DuplicateId(PersonId),

    /// A registry position no longer exists.
    #[error("Registry index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Seed data could not be parsed.
    #[error("Seed format error: {0}")]
    SeedFormat(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RosterError {
    /// Argument names a client should highlight for this error.
    #[must_use]
    pub fn invalid_args(&self) -> Vec<&'static str> {
        match self {
            Self::DuplicateName { .. } => vec!["name"],
            Self::InvalidField { field, .. } => vec![*field],
            _ => vec![],
        }
    }

    /// Whether the error was caused by client input rather than the server.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::DuplicateName { .. } | Self::InvalidField { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
