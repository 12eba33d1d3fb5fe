//! # Trip Planner Backend
//!
//! Contains all non-UI logic for the trip planner application.
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (browser frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (business logic, services)
//!     ↓
//! Storage Layer (XML plan documents)
//! ```
//!
//! It is UI-agnostic: the REST API is the only surface, so any frontend
//! that speaks the `shared` DTOs can drive it.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{CurrencyApiProvider, RateService, TripService};
use crate::io::rest;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub trip_service: TripService,
    pub rate_service: RateService,
}

/// Initialize the backend with all required services
pub fn initialize_backend() -> AppState {
    info!("Setting up domain services");
    let trip_service = TripService::new();
    let rate_service = RateService::new(Arc::new(CurrencyApiProvider::new()));

    AppState {
        trip_service,
        rate_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .nest("/trip", rest::trip_apis::router())
        .nest("/events", rest::event_apis::router())
        .nest("/summary", rest::summary_apis::router())
        .nest("/rates", rest::rates_apis::router())
        .nest("/plan", rest::plan_apis::router());

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::events::SubmitEventCommand;
    use crate::domain::commands::trip::GenerateTripCommand;
    use crate::domain::financial_service;
    use crate::domain::models::Currency;
    use crate::storage::xml;

    #[test]
    fn test_full_flow() {
        let app_state = initialize_backend();

        // 1. Generate a trip
        app_state
            .trip_service
            .generate(GenerateTripCommand {
                name: "Costa Caribe".to_string(),
                start_date: "2025-07-01".to_string(),
                end_date: "2025-07-05".to_string(),
                people_count: 2,
            })
            .unwrap();

        // 2. Submit an overnight stay that spans two days
        let result = app_state
            .trip_service
            .submit_event(SubmitEventCommand {
                date: "2025-07-01".to_string(),
                edit_index: None,
                place: "Hotel Caribe".to_string(),
                origin: String::new(),
                destination: String::new(),
                start_time: "22:00".to_string(),
                duration: 10.0,
                duration_unit: "Horas".to_string(),
                price: 100.0,
                currency: "USD".to_string(),
                types: vec!["Alojamiento".to_string()],
                transport_mode: None,
                estimated_time: String::new(),
                comments: String::new(),
            })
            .unwrap();
        assert_eq!(result.multi_day_count, 2);

        // 3. Summarize costs
        let trip = app_state.trip_service.snapshot().unwrap();
        let summary =
            financial_service::summarize(&trip, &app_state.rate_service.current(), Currency::Usd)
                .unwrap();
        assert!((summary.total - 100.0).abs() < 1e-9);
        assert!((summary.per_person - 50.0).abs() < 1e-9);

        // 4. Export, then import into a fresh session
        let document = xml::write_plan(&trip, &app_state.rate_service.current());
        let fresh = initialize_backend();
        let (imported, rates) = xml::parse_plan(&document).unwrap();
        fresh.rate_service.replace(rates);
        fresh.trip_service.replace_trip(imported);

        let restored = fresh.trip_service.snapshot().unwrap();
        assert_eq!(restored.name, "Costa Caribe");
        assert_eq!(restored.ledger.total_event_count(), 2);
    }
}
