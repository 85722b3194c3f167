//! # Roster CLI Module
//!
//! This module implements the CLI interface for Roster.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show registry counts
//! - `list` - List persons, optionally filtered by phone presence
//! - `find` - Look up a person by name
//! - `check-seed` - Validate a seed file without serving it

mod commands;

use crate::config::RosterConfig;
use clap::{Parser, Subcommand};
use roster_core::{PhoneFilter, RosterError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Roster - Person Registry Server
///
/// Serves a registry of persons with unique names through a
/// query/mutation contract.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to roster.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed file (JSON array or TOML [[person]] tables); overrides the config
    #[arg(short, long, global = true)]
    pub seed: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show registry counts
    Status,

    /// List persons in registry order
    List {
        /// Filter by phone presence (YES or NO)
        #[arg(short, long)]
        phone: Option<PhoneFilter>,
    },

    /// Find a person by exact name
    Find {
        /// Name to look up (case-sensitive)
        #[arg(short, long)]
        name: String,
    },

    /// Validate the seed without starting the server
    CheckSeed,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RosterError> {
    let mut config = RosterConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed.path = Some(seed);
    }
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config, cli.quiet).await
        }
        Some(Commands::List { phone }) => cmd_list(&config, json_mode, phone),
        Some(Commands::Find { name }) => cmd_find(&config, json_mode, &name),
        Some(Commands::CheckSeed) => cmd_check_seed(&config, json_mode),
        Some(Commands::Status) | None => cmd_status(&config, json_mode),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_filter() {
        let cli = Cli::try_parse_from(["roster", "list", "--phone", "NO"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                phone: Some(PhoneFilter::No)
            })
        ));
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["roster", "list", "--phone", "MAYBE"]).is_err());
    }

    #[test]
    fn global_seed_after_subcommand() {
        let cli = Cli::try_parse_from(["roster", "find", "--name", "Ada", "--seed", "p.json"])
            .expect("parse");
        assert_eq!(cli.seed, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn server_overrides_are_optional() {
        let cli = Cli::try_parse_from(["roster", "server", "-p", "9000"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Server {
                host: None,
                port: Some(9000)
            })
        ));
    }
}
