//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Queries hold the read guard; mutations hold the write guard for the whole
//! check-then-write sequence, so concurrent `addPerson` calls with the same
//! name cannot both pass the uniqueness check.

use super::{
    AppState,
    types::{FieldResponse, HealthResponse, MutationRequest, QueryRequest, StatusResponse},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use roster_core::{NewPerson, PhoneFilter, Resolver};
use serde_json::Value;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get registry status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let resolver = state.resolver.read().await;

    let response = StatusResponse {
        person_count: resolver.person_count(),
        with_phone: resolver.all_persons(Some(PhoneFilter::Yes)).len(),
        without_phone: resolver.all_persons(Some(PhoneFilter::No)).len(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// QUERY HANDLER
// =============================================================================

/// Resolve a query field.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> impl IntoResponse {
    let resolver = state.resolver.read().await;
    (StatusCode::OK, Json(execute_query(&resolver, &request)))
}

/// Resolve a query against the resolver.
pub fn execute_query(resolver: &Resolver, request: &QueryRequest) -> FieldResponse {
    let field = request.field();
    match request {
        QueryRequest::PersonCount => {
            FieldResponse::resolved(field, Value::from(resolver.person_count()))
        }
        QueryRequest::AllPersons { phone } => {
            FieldResponse::persons(field, &resolver.all_persons(*phone))
        }
        QueryRequest::FindPerson { name } => {
            FieldResponse::person(field, resolver.find_person(name).as_ref())
        }
    }
}

// =============================================================================
// MUTATION HANDLER
// =============================================================================

/// Resolve a mutation field.
pub async fn mutation_handler(
    State(state): State<AppState>,
    Json(request): Json<MutationRequest>,
) -> impl IntoResponse {
    let mut resolver = state.resolver.write().await;
    (StatusCode::OK, Json(execute_mutation(&mut resolver, request)))
}

/// Apply a mutation to the resolver.
pub fn execute_mutation(resolver: &mut Resolver, request: MutationRequest) -> FieldResponse {
    let field = request.field();
    match request {
        MutationRequest::AddPerson {
            name,
            phone,
            street,
            city,
        } => {
            let new = NewPerson {
                name,
                phone,
                street,
                city,
            };
            match resolver.add_person(new) {
                Ok(person) => {
                    tracing::info!(
                        event = "person_added",
                        name = %person.name,
                        id = %person.id,
                        "Person added"
                    );
                    FieldResponse::person(field, Some(&person))
                }
                Err(e) => {
                    tracing::warn!(event = "add_rejected", error = %e, "addPerson rejected");
                    FieldResponse::failed(field, &e)
                }
            }
        }

        MutationRequest::EditNumber { name, phone } => match resolver.edit_number(&name, phone) {
            Ok(Some(person)) => {
                tracing::info!(
                    event = "phone_edited",
                    name = %person.name,
                    id = %person.id,
                    "Phone number updated"
                );
                FieldResponse::person(field, Some(&person))
            }
            Ok(None) => {
                tracing::debug!(event = "edit_not_found", name = %name, "editNumber found no person");
                FieldResponse::person(field, None)
            }
            Err(e) => {
                tracing::warn!(event = "edit_rejected", error = %e, "editNumber rejected");
                FieldResponse::failed(field, &e)
            }
        },
    }
}
