//! # Roster
//!
//! HTTP transport, CLI and configuration around `roster-core`.
//!
//! Exposed as a library so integration tests can build the router
//! (`roster::api::create_router`) without binding a socket.

pub mod api;
pub mod cli;
pub mod config;
