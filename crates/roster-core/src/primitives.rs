//! # Engine Limits
//!
//! Hardcoded runtime limits for the Roster engine.
//!
//! These are compiled into the binary and are immutable at runtime. They
//! bound the memory a single request or seed file can make the registry hold.

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length in bytes for `name`, `phone`, `street` and `city`.
///
/// Longer values are rejected before the registry is touched.
pub const MAX_FIELD_LENGTH: usize = 1024;

/// Maximum number of records accepted from a single seed source.
pub const MAX_SEED_RECORDS: usize = 100_000;

/// Maximum size of a seed file read from disk (16 MB).
pub const MAX_SEED_FILE_SIZE: u64 = 16 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_file_can_hold_max_records() {
        // A minimal record is well under 64 bytes of JSON.
        assert!(MAX_SEED_FILE_SIZE >= (MAX_SEED_RECORDS as u64) * 64);
    }
}
