//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Field names, argument names and nullability follow the person contract:
//! `personCount`, `allPersons(phone)`, `findPerson(name)`,
//! `addPerson(name, phone, street, city)`, `editNumber(name, phone)`.

use roster_core::{Address, Person, PhoneFilter, RosterError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Registry status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub person_count: usize,
    pub with_phone: usize,
    pub without_phone: usize,
}

// =============================================================================
// QUERY / MUTATION REQUESTS
// =============================================================================

/// Query request, tagged by contract field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum QueryRequest {
    PersonCount,
    AllPersons {
        #[serde(default)]
        phone: Option<PhoneFilter>,
    },
    FindPerson {
        name: String,
    },
}

impl QueryRequest {
    /// Contract field name of this request.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::PersonCount => "personCount",
            Self::AllPersons { .. } => "allPersons",
            Self::FindPerson { .. } => "findPerson",
        }
    }
}

/// Mutation request, tagged by contract field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum MutationRequest {
    AddPerson {
        name: String,
        #[serde(default)]
        phone: Option<String>,
        street: String,
        city: String,
    },
    EditNumber {
        name: String,
        phone: String,
    },
}

impl MutationRequest {
    /// Contract field name of this request.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::AddPerson { .. } => "addPerson",
            Self::EditNumber { .. } => "editNumber",
        }
    }
}

// =============================================================================
// PERSON JSON
// =============================================================================

/// Person as sent to clients, with `address` resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonJson {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    pub address: Option<AddressJson>,
}

impl From<&Person> for PersonJson {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.to_string(),
            name: person.name.clone(),
            phone: person.phone.clone(),
            street: person.street.clone(),
            city: person.city.clone(),
            address: Some(person.address().into()),
        }
    }
}

/// Address JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressJson {
    pub street: String,
    pub city: String,
}

impl From<Address> for AddressJson {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
        }
    }
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Error code for rejected client input.
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

/// Error code for server-side failures.
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Error code for requests refused by the rate limiter.
pub const RATE_LIMITED: &str = "RATE_LIMITED";

/// `{"data": {...}, "errors": [...]}` envelope shared by queries and mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldResponse {
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// A single error entry of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub path: Vec<String>,
    pub extensions: ErrorExtensions,
}

/// Structured error context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorExtensions {
    pub code: String,
    #[serde(rename = "invalidArgs", default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_args: Vec<String>,
}

impl FieldResponse {
    /// Successful resolution of `field`.
    pub fn resolved(field: &str, value: Value) -> Self {
        let mut data = Map::new();
        data.insert(field.to_string(), value);
        Self {
            data,
            errors: vec![],
        }
    }

    /// Resolution of a nullable person field.
    pub fn person(field: &str, person: Option<&Person>) -> Self {
        Self::resolved(field, person.map_or(Value::Null, |p| to_value(&PersonJson::from(p))))
    }

    /// Resolution of a person list field.
    pub fn persons(field: &str, persons: &[Person]) -> Self {
        let list: Vec<PersonJson> = persons.iter().map(PersonJson::from).collect();
        Self::resolved(field, to_value(&list))
    }

    /// Failed resolution of `field`; the field resolves to null.
    pub fn failed(field: &str, err: &RosterError) -> Self {
        let code = if err.is_user_input() {
            BAD_USER_INPUT
        } else {
            INTERNAL_SERVER_ERROR
        };

        let mut response = Self::resolved(field, Value::Null);
        response.errors.push(FieldError {
            message: err.to_string(),
            path: vec![field.to_string()],
            extensions: ErrorExtensions {
                code: code.to_string(),
                invalid_args: err.invalid_args().into_iter().map(str::to_string).collect(),
            },
        });
        response
    }

    /// Request refused before any field was resolved; `data` stays empty.
    pub fn rejected(code: &str, message: impl Into<String>) -> Self {
        Self {
            data: Map::new(),
            errors: vec![FieldError {
                message: message.into(),
                path: vec![],
                extensions: ErrorExtensions {
                    code: code.to_string(),
                    invalid_args: vec![],
                },
            }],
        }
    }

    /// Value of `field` in `data`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// Serialize a response value, falling back to null.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize response value: {}", e);
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn unserializable_value_falls_back_to_null() {
        let mut keyed_by_list = BTreeMap::new();
        keyed_by_list.insert(vec![1u8], 1u8);
        assert_eq!(to_value(&keyed_by_list), Value::Null);
    }

    #[test]
    fn address_json_shape() {
        let value = to_value(&AddressJson {
            street: "1 Loop".to_string(),
            city: "York".to_string(),
        });
        assert_eq!(value, serde_json::json!({"street": "1 Loop", "city": "York"}));
    }
}
