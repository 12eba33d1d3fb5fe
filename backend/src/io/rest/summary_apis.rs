//! # REST API for the Financial Summary
//!
//! Endpoint for the cost breakdown of the current trip in a chosen
//! display currency.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};
use serde::Deserialize;

use crate::domain::models::Currency;
use crate::domain::{financial_service, DomainError};
use crate::io::rest::error_response;
use crate::io::rest::mappers::summary_mapper::SummaryMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Display currency code; defaults to USD
    pub currency: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_summary))
}

/// Summarize the current trip's costs in the requested currency.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let code = query.currency.unwrap_or_else(|| "USD".to_string());
    info!("GET /api/summary - currency: {}", code);

    let currency = match Currency::from_str(&code) {
        Ok(currency) => currency,
        Err(e) => return error_response(e),
    };
    let trip = match state.trip_service.snapshot() {
        Some(trip) => trip,
        None => return error_response(DomainError::NoTrip),
    };

    let rates = state.rate_service.current();
    match financial_service::summarize(&trip, &rates, currency) {
        Ok(summary) => (StatusCode::OK, Json(SummaryMapper::to_dto(summary))).into_response(),
        Err(e) => {
            error!("❌ Failed to summarize trip: {}", e);
            error_response(e)
        }
    }
}
