//! # REST API for Plan Export and Import
//!
//! Endpoints for exporting the session as an XML plan document and for
//! restoring a session from one. Import is all-or-nothing: a document
//! that fails to parse leaves the current trip and rates untouched.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use crate::domain::DomainError;
use crate::io::rest::error_response;
use crate::io::rest::mappers::{rates_mapper::RatesMapper, trip_mapper::TripMapper};
use crate::storage::xml;
use crate::AppState;
use shared::{ExportPlanResponse, ImportPlanRequest, ImportPlanResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export_plan))
        .route("/import", post(import_plan))
}

/// Export the current trip and rates as an XML document.
pub async fn export_plan(State(state): State<AppState>) -> impl IntoResponse {
    let trip = match state.trip_service.snapshot() {
        Some(trip) => trip,
        None => return error_response(DomainError::NoTrip),
    };
    let rates = state.rate_service.current();

    let xml_content = xml::write_plan(&trip, &rates);
    let event_count = trip.ledger.total_event_count();
    info!(
        "📄 EXPORT: Plan '{}' serialized with {} events",
        trip.name, event_count
    );

    let response = ExportPlanResponse {
        filename: xml::plan_filename(&trip.name),
        trip_name: trip.name,
        event_count,
        xml_content,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Import a previously exported plan document, replacing the current trip
/// and rates wholesale.
pub async fn import_plan(
    State(state): State<AppState>,
    Json(request): Json<ImportPlanRequest>,
) -> impl IntoResponse {
    info!("POST /api/plan/import - {} bytes", request.xml_content.len());

    match xml::parse_plan(&request.xml_content) {
        Ok((trip, rates)) => {
            let success_message = format!(
                "Plan '{}' imported with {} events",
                trip.name,
                trip.ledger.total_event_count()
            );
            state.rate_service.replace(rates);
            state.trip_service.replace_trip(trip.clone());

            let response = ImportPlanResponse {
                trip: TripMapper::to_dto(&trip),
                rates: RatesMapper::to_dto(rates),
                success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to import plan: {}", e);
            error_response(e)
        }
    }
}
