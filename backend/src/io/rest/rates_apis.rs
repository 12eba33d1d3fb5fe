//! # REST API for Exchange Rates
//!
//! Endpoints for reading the session's rates, entering them manually and
//! refreshing them from the remote currency API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;

use crate::domain::commands::rates::UpdateRatesCommand;
use crate::io::rest::mappers::rates_mapper::RatesMapper;
use crate::AppState;
use shared::{RefreshRatesResponse, UpdateRatesRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_rates).post(update_rates))
        .route("/refresh", post(refresh_rates))
}

/// Current conversion rates.
pub async fn get_rates(State(state): State<AppState>) -> impl IntoResponse {
    Json(RatesMapper::to_dto(state.rate_service.current()))
}

/// Apply manually entered rates; missing or non-positive values leave the
/// corresponding rate unchanged.
pub async fn update_rates(
    State(state): State<AppState>,
    Json(request): Json<UpdateRatesRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/rates - usd_cop: {:?}, eur_cop: {:?}",
        request.usd_cop, request.eur_cop
    );

    let rates = state.rate_service.set_manual(UpdateRatesCommand {
        usd_cop: request.usd_cop,
        eur_cop: request.eur_cop,
    });
    (StatusCode::OK, Json(RatesMapper::to_dto(rates)))
}

/// Fetch fresh COP rates from the currency API. Each currency succeeds or
/// fails on its own; a failed fetch keeps the prior rate, so this always
/// answers 200 and the body says what happened.
pub async fn refresh_rates(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/rates/refresh");

    let result = state.rate_service.refresh().await;
    let message = match (result.usd_cop, result.eur_cop) {
        (Some(_), Some(_)) => "Exchange rates updated successfully".to_string(),
        (Some(_), None) => {
            "Updated USD/COP; the EUR fetch failed and kept its previous rate".to_string()
        }
        (None, Some(_)) => {
            "Updated EUR/COP; the USD fetch failed and kept its previous rate".to_string()
        }
        (None, None) => "Rate refresh failed; previous rates kept".to_string(),
    };

    let response = RefreshRatesResponse {
        usd_cop: result.usd_cop,
        eur_cop: result.eur_cop,
        rates: RatesMapper::to_dto(result.rates),
        message,
    };
    (StatusCode::OK, Json(response))
}
