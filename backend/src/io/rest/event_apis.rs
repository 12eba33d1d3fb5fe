//! # REST API for Event Submission
//!
//! Endpoints for adding, editing and deleting calendar events. A
//! submission may fan out across several days through the multi-day
//! splitter; the response reports how many days were actually stored.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use log::{error, info};

use crate::domain::commands::events::{DeleteEventCommand, SubmitEventCommand};
use crate::io::rest::error_response;
use crate::AppState;
use shared::{DeleteEventResponse, SubmitEventRequest, SubmitEventResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_event))
        .route("/:date/:index", delete(delete_event))
}

/// Add a new event (split-and-merge) or edit one in place when
/// `edit_index` is present.
pub async fn submit_event(
    State(state): State<AppState>,
    Json(request): Json<SubmitEventRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/events - '{}' on {} (edit: {:?})",
        request.place, request.date, request.edit_index
    );

    let command = SubmitEventCommand {
        date: request.date,
        edit_index: request.edit_index,
        place: request.place,
        origin: request.origin,
        destination: request.destination,
        start_time: request.start_time,
        duration: request.duration,
        duration_unit: request.duration_unit,
        price: request.price,
        currency: request.currency,
        types: request.types,
        transport_mode: request.transport_mode,
        estimated_time: request.estimated_time,
        comments: request.comments,
    };

    match state.trip_service.submit_event(command) {
        Ok(result) => {
            let response = SubmitEventResponse {
                added: result.added,
                multi_day_count: result.multi_day_count,
                rejected: result.rejected,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to submit event: {}", e);
            error_response(e)
        }
    }
}

/// Delete the event at `index` on `date`.
pub async fn delete_event(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> impl IntoResponse {
    info!("DELETE /api/events/{}/{}", date, index);

    match state.trip_service.delete_event(DeleteEventCommand { date, index }) {
        Ok(()) => {
            let response = DeleteEventResponse {
                success_message: "Event deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to delete event: {}", e);
            error_response(e)
        }
    }
}
