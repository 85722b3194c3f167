//! # Roster HTTP API Module
//!
//! This module implements the HTTP server using axum.
//!
//! ## Endpoints
//!
//! - `POST /query` - Resolve `personCount`, `allPersons` or `findPerson`
//! - `POST /mutation` - Resolve `addPerson` or `editNumber`
//! - `GET /status` - Registry counts
//! - `GET /health` - Health check
//!
//! ## HTTP Configuration
//!
//! - `ROSTER_CORS_ORIGINS` / `[http] cors_origins`: allowed origins, or "*" for all (default: localhost only)
//! - `ROSTER_RATE_LIMIT` / `[http] rate_limit`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    execute_mutation, execute_query, health_handler, mutation_handler, query_handler,
    status_handler,
};
pub use middleware::RequestLimiter;
pub use types::{
    AddressJson, BAD_USER_INPUT, ErrorExtensions, FieldError, FieldResponse, HealthResponse,
    INTERNAL_SERVER_ERROR, MutationRequest, PersonJson, QueryRequest, RATE_LIMITED, StatusResponse,
};

use crate::config::HttpConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use roster_core::{Resolver, RosterError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KiB).
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the resolver.
#[derive(Clone)]
pub struct AppState {
    /// The resolution engine. Queries take the read guard, mutations the write guard.
    pub resolver: Arc<RwLock<Resolver>>,
}

impl AppState {
    /// Create new app state around a resolver.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(RwLock::new(resolver)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from configuration.
///
/// - `None`: localhost only
/// - `["*"]`: all origins
/// - otherwise: the listed origins; if none parse, localhost only
fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some([only]) if only == "*" => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed_origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000",
        "http://localhost:4000",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:4000",
    ];
    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - if enabled
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    let cors = build_cors_layer(http.cors_origins.as_deref());

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/query", post(handlers::query_handler))
        .route("/mutation", post(handlers::mutation_handler));

    match http.rate_limiter() {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", http.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
///
/// The resolver must already be seeded; requests are accepted only after the
/// listener is bound.
pub async fn run_server(addr: &str, resolver: Resolver, http: &HttpConfig) -> Result<(), RosterError> {
    let state = AppState::new(resolver);
    let router = create_router(state, http);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RosterError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Roster HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RosterError::Io(format!("Server error: {}", e)))
}

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

// =============================================================================
// TESTS
// =============================================================================
