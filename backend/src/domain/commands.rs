//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the public DTOs from
//! the `shared` crate to these internal types.

pub mod trip {
    /// Input for generating a fresh trip calendar.
    #[derive(Debug, Clone)]
    pub struct GenerateTripCommand {
        pub name: String,
        /// ISO 8601 date (YYYY-MM-DD)
        pub start_date: String,
        /// ISO 8601 date (YYYY-MM-DD)
        pub end_date: String,
        pub people_count: u32,
    }
}

pub mod events {
    /// Input for adding or editing an event. `edit_index` set means
    /// overwrite-in-place on `date`; unset means split-and-merge.
    #[derive(Debug, Clone)]
    pub struct SubmitEventCommand {
        pub date: String,
        pub edit_index: Option<usize>,
        pub place: String,
        pub origin: String,
        pub destination: String,
        pub start_time: String,
        pub duration: f64,
        pub duration_unit: String,
        pub price: f64,
        pub currency: String,
        pub types: Vec<String>,
        pub transport_mode: Option<String>,
        pub estimated_time: String,
        pub comments: String,
    }

    /// Outcome of an event submission.
    #[derive(Debug, Clone)]
    pub struct SubmitEventResult {
        pub added: bool,
        /// Number of calendar days actually stored (may be fewer than the
        /// splitter produced when the tail fell outside the trip range)
        pub multi_day_count: u32,
        pub rejected: bool,
        pub success_message: String,
    }

    /// Input for deleting an event.
    #[derive(Debug, Clone)]
    pub struct DeleteEventCommand {
        pub date: String,
        pub index: usize,
    }
}

pub mod rates {
    use crate::domain::models::ConversionRates;

    /// Manual rate entry; `None` leaves a rate unchanged.
    #[derive(Debug, Clone)]
    pub struct UpdateRatesCommand {
        pub usd_cop: Option<f64>,
        pub eur_cop: Option<f64>,
    }

    /// Result of a remote refresh. A `None` per currency means that fetch
    /// failed and the prior rate was retained.
    #[derive(Debug, Clone)]
    pub struct RefreshRatesResult {
        pub usd_cop: Option<f64>,
        pub eur_cop: Option<f64>,
        pub rates: ConversionRates,
    }
}
