//! # Roster - Person Registry Server
//!
//! The main binary for the Roster person registry.
//!
//! This application provides:
//! - HTTP API server (axum-based) for the query/mutation contract
//! - CLI interface for inspecting a seed population
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │               apps/roster (THE BINARY)            │
//! │                                                   │
//! │   ┌─────────────┐            ┌─────────────┐      │
//! │   │    CLI      │            │  HTTP API   │      │
//! │   │   (clap)    │            │   (axum)    │      │
//! │   └──────┬──────┘            └──────┬──────┘      │
//! │          └──────────────┬───────────┘             │
//! │                         ▼                         │
//! │                 ┌───────────────┐                 │
//! │                 │  roster-core  │                 │
//! │                 │ (THE ENGINE)  │                 │
//! │                 └───────────────┘                 │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server with the demo population
//! roster server --port 4000
//!
//! # Serve a seed file
//! roster --seed people.toml server
//!
//! # CLI inspection
//! roster status
//! roster list --phone NO
//! roster find --name Midu
//! ```

use clap::Parser;
use roster::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // ROSTER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ROSTER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "roster=debug,roster_core=debug,tower_http=debug"
    } else {
        "roster=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
