//! # Seed Formats
//!
//! Parsing of the records loaded into the registry once, at startup.
//!
//! Two encodings are accepted:
//! - JSON: a top-level array of person objects
//! - TOML: a document of `[[person]]` tables
//!
//! Each record carries `name`, `street`, `city`, an optional `phone` and an
//! optional `id`. Records without an id get one from the resolver's
//! generator when seeded.
//!
//! ## Security
//!
//! File size and record count are validated before the records reach the
//! resolver (`MAX_SEED_FILE_SIZE`, `MAX_SEED_RECORDS`).

use crate::primitives::{MAX_SEED_FILE_SIZE, MAX_SEED_RECORDS};
use crate::{NewPerson, PersonId, RosterError};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// SEED RECORD
// =============================================================================

/// A person record as provided by a seed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPerson {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
}

impl SeedPerson {
    #[must_use]
    pub fn new(name: impl Into<String>, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            street: street.into(),
            city: city.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(PersonId::new(id));
        self
    }

    /// Split into creation input and the optional pre-assigned id.
    #[must_use]
    pub fn into_parts(self) -> (NewPerson, Option<PersonId>) {
        let new = NewPerson {
            name: self.name,
            phone: self.phone,
            street: self.street,
            city: self.city,
        };
        (new, self.id)
    }
}

/// TOML seed document.
#[derive(Debug, Deserialize)]
struct TomlSeed {
    #[serde(default)]
    person: Vec<SeedPerson>,
}

// =============================================================================
// FORMAT DETECTION
// =============================================================================

/// Encoding of a seed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Toml,
}

impl SeedFormat {
    /// Pick the format from a file extension. Unknown extensions read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a JSON array of seed records.
pub fn parse_json(data: &[u8]) -> Result<Vec<SeedPerson>, RosterError> {
    let records: Vec<SeedPerson> =
        serde_json::from_slice(data).map_err(|e| RosterError::SeedFormat(e.to_string()))?;
    check_record_count(records)
}

/// Parse a TOML document of `[[person]]` tables.
pub fn parse_toml(data: &str) -> Result<Vec<SeedPerson>, RosterError> {
    let doc: TomlSeed = toml::from_str(data).map_err(|e| RosterError::SeedFormat(e.to_string()))?;
    check_record_count(doc.person)
}

/// Parse seed bytes in the given format.
pub fn parse(data: &[u8], format: SeedFormat) -> Result<Vec<SeedPerson>, RosterError> {
    match format {
        SeedFormat::Json => parse_json(data),
        SeedFormat::Toml => {
            let text = std::str::from_utf8(data)
                .map_err(|e| RosterError::SeedFormat(format!("Seed is not UTF-8: {}", e)))?;
            parse_toml(text)
        }
    }
}

/// Read and parse a seed file, picking the format from its extension.
pub fn load_file(path: &Path) -> Result<Vec<SeedPerson>, RosterError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        RosterError::Io(format!("Cannot read seed '{}': {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(RosterError::Io(format!(
            "Seed path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_SEED_FILE_SIZE {
        return Err(RosterError::SeedFormat(format!(
            "Seed size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SEED_FILE_SIZE
        )));
    }

    let data = std::fs::read(path)
        .map_err(|e| RosterError::Io(format!("Read seed '{}': {}", path.display(), e)))?;
    parse(&data, SeedFormat::from_path(path))
}

fn check_record_count(records: Vec<SeedPerson>) -> Result<Vec<SeedPerson>, RosterError> {
    if records.len() > MAX_SEED_RECORDS {
        return Err(RosterError::SeedFormat(format!(
            "Seed record count {} exceeds maximum allowed {}",
            records.len(),
            MAX_SEED_RECORDS
        )));
    }
    Ok(records)
}

// =============================================================================
// DEMO POPULATION
// =============================================================================

/// The population served when no seed file is configured.
#[must_use]
pub fn demo_seed() -> Vec<SeedPerson> {
    vec![
        SeedPerson::new("Midu", "123 Main St", "Anytown")
            .phone("224-876-5262")
            .id("456456"),
        SeedPerson::new("Youssef", "5434 Main St", "Anytown")
            .phone("754-876-9876")
            .id("7474646"),
        SeedPerson::new("Itzi", "5435 Main St", "Anytown").id("234678"),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
