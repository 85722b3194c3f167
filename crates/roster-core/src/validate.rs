//! # Field Validation
//!
//! Argument checks applied before any registry mutation.
//!
//! - Reject empty names; street and city may be empty
//! - Reject values longer than `MAX_FIELD_LENGTH`
//! - No trimming or normalization: names compare byte-for-byte

use crate::primitives::MAX_FIELD_LENGTH;
use crate::{NewPerson, RosterError};

/// Validates mutation arguments.
pub struct FieldValidator;

impl FieldValidator {
    /// Validate the input of `addPerson`.
    ///
    /// The phone may be empty; it is only length-checked.
    pub fn validate_new(new: &NewPerson) -> Result<(), RosterError> {
        Self::require("name", &new.name)?;
        Self::bounded("street", &new.street)?;
        Self::bounded("city", &new.city)?;
        if let Some(phone) = &new.phone {
            Self::validate_phone(phone)?;
        }
        Ok(())
    }

    /// Validate a phone number argument.
    pub fn validate_phone(phone: &str) -> Result<(), RosterError> {
        Self::bounded("phone", phone)
    }

    fn require(field: &'static str, value: &str) -> Result<(), RosterError> {
        if value.is_empty() {
            return Err(RosterError::InvalidField {
                field,
                reason: "must not be empty".to_string(),
            });
        }
        Self::bounded(field, value)
    }

    fn bounded(field: &'static str, value: &str) -> Result<(), RosterError> {
        if value.len() > MAX_FIELD_LENGTH {
            return Err(RosterError::InvalidField {
                field,
                reason: format!(
                    "length {} exceeds maximum {} bytes",
                    value.len(),
                    MAX_FIELD_LENGTH
                ),
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
