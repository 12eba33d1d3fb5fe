//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the trip planner application.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for frontend integration
//! - Request logging
//!
//! It is a pure translation layer: all validation and business rules live
//! in the domain services, and the DTOs from the `shared` crate are mapped
//! to domain commands at this boundary.

pub mod event_apis;
pub mod mappers;
pub mod plan_apis;
pub mod rates_apis;
pub mod summary_apis;
pub mod trip_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::domain::DomainError;

/// Translate a domain error into an HTTP response with a JSON body.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::Validation(_)
        | DomainError::InvalidCurrency(_)
        | DomainError::InvalidEventType(_)
        | DomainError::InvalidTransportMode(_)
        | DomainError::DocumentParse(_)
        | DomainError::NoTrip => StatusCode::BAD_REQUEST,
        DomainError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
        DomainError::RateFetch { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
