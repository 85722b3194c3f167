//! # Configuration
//!
//! Settings for the server and the seed source.
//!
//! Precedence, highest first: CLI flags, environment, `roster.toml`, defaults.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 4000
//!
//! [seed]
//! path = "people.json"
//!
//! [http]
//! rate_limit = 100
//! cors_origins = ["http://localhost:3000"]
//! ```
//!
//! ## Environment Variables
//!
//! - `ROSTER_RATE_LIMIT`: requests per second (0 disables)
//! - `ROSTER_CORS_ORIGINS`: comma-separated origins, or `*` for all

use crate::api::RequestLimiter;
use roster_core::RosterError;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Maximum size of `roster.toml` (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// CONFIG SECTIONS
// =============================================================================

/// Full configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub server: ServerConfig,
    pub seed: SeedConfig,
    pub http: HttpConfig,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[seed]`
///
/// Without a path the built-in demo population is served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub path: Option<PathBuf>,
}

/// `[http]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. `None` means localhost only; `["*"]` means all.
    pub cors_origins: Option<Vec<String>>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: None,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl RosterConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, RosterError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.http.apply_env();
        Ok(config)
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, RosterError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            RosterError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(RosterError::Io(format!(
                "Config size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| RosterError::Io(format!("Read config '{}': {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// Parse a TOML configuration string.
    pub fn from_toml(text: &str) -> Result<Self, RosterError> {
        toml::from_str(text).map_err(|e| RosterError::Io(format!("Invalid config: {}", e)))
    }
}

impl HttpConfig {
    /// Limiter for the configured rate, or `None` when limiting is disabled.
    #[must_use]
    pub fn rate_limiter(&self) -> Option<RequestLimiter> {
        NonZeroU32::new(self.rate_limit).map(RequestLimiter::per_second)
    }

    /// Override settings from `ROSTER_RATE_LIMIT` and `ROSTER_CORS_ORIGINS`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var("ROSTER_RATE_LIMIT") {
            match raw.parse() {
                Ok(rps) => self.rate_limit = rps,
                Err(_) => tracing::warn!("Ignoring invalid ROSTER_RATE_LIMIT '{}'", raw),
            }
        }

        if let Ok(raw) = std::env::var("ROSTER_CORS_ORIGINS") {
            self.cors_origins = Some(parse_origins(&raw));
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RosterConfig::default();
        assert_eq!(config.server.addr(), "127.0.0.1:4000");
        assert_eq!(config.seed.path, None);
        assert_eq!(config.http.rate_limit, DEFAULT_RATE_LIMIT);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RosterConfig::from_toml("[server]\nport = 9000\n").expect("parse");
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn full_toml() {
        let config = RosterConfig::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [seed]
            path = "people.toml"

            [http]
            rate_limit = 0
            cors_origins = ["*"]
            "#,
        )
        .expect("parse");

        assert_eq!(config.seed.path, Some(PathBuf::from("people.toml")));
        assert_eq!(config.http.rate_limit, 0);
        assert_eq!(config.http.cors_origins, Some(vec!["*".to_string()]));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RosterConfig::from_toml("[server]\nhots = \"x\"\n").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = RosterConfig::from_file(&dir.path().join("roster.toml")).expect_err("missing");
        assert!(matches!(err, RosterError::Io(_)));
    }

    #[test]
    fn zero_rate_disables_limiter() {
        let http = HttpConfig {
            rate_limit: 0,
            ..HttpConfig::default()
        };
        assert!(http.rate_limiter().is_none());
    }

    #[test]
    fn rate_limiter_follows_configured_rate() {
        let http = HttpConfig {
            rate_limit: 2,
            ..HttpConfig::default()
        };
        let limiter = http.rate_limiter().expect("enabled");
        assert!(limiter.admit());
        assert!(limiter.admit());
        assert!(!limiter.admit());
    }

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
