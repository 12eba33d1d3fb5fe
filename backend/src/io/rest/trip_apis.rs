//! # REST API for Trip Lifecycle
//!
//! Endpoints for generating a trip calendar and reading the current
//! snapshot.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use crate::domain::commands::trip::GenerateTripCommand;
use crate::domain::DomainError;
use crate::io::rest::error_response;
use crate::io::rest::mappers::trip_mapper::TripMapper;
use crate::AppState;
use shared::GenerateTripRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_trip).post(generate_trip))
}

/// Generate a fresh trip calendar, wiping any prior trip.
pub async fn generate_trip(
    State(state): State<AppState>,
    Json(request): Json<GenerateTripRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/trip - '{}' {}..{} for {} people",
        request.name, request.start_date, request.end_date, request.people_count
    );

    let command = GenerateTripCommand {
        name: request.name,
        start_date: request.start_date,
        end_date: request.end_date,
        people_count: request.people_count,
    };

    match state.trip_service.generate(command) {
        Ok(trip) => (StatusCode::OK, Json(TripMapper::to_dto(&trip))).into_response(),
        Err(e) => {
            error!("❌ Failed to generate trip: {}", e);
            error_response(e)
        }
    }
}

/// Current trip snapshot, every day of the range included.
pub async fn get_trip(State(state): State<AppState>) -> impl IntoResponse {
    match state.trip_service.snapshot() {
        Some(trip) => (StatusCode::OK, Json(TripMapper::to_dto(&trip))).into_response(),
        None => error_response(DomainError::NoTrip),
    }
}
