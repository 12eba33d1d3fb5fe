use serde::{Deserialize, Serialize};

/// A single day-scoped event as it appears on the trip calendar.
///
/// Times are zero-padded `HH:MM` strings; `end_time` may be the `"24:00"`
/// sentinel for an event slice that runs up to midnight. Currency, duration
/// unit, category tags and transport mode travel as plain strings over the
/// wire; the backend validates them against its closed enumerations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub place: String,
    pub origin: String,
    pub destination: String,
    /// Start of the event within its day (HH:MM, 24h)
    pub start_time: String,
    /// End of the event within its day (HH:MM, or "24:00")
    pub end_time: String,
    pub duration: f64,
    /// "Horas" or "Minutos"
    pub duration_unit: String,
    /// This day's share of the cost (proportional for multi-day events)
    pub price: f64,
    /// Pre-split total price, present only on multi-day slices
    pub original_price: Option<f64>,
    /// "USD", "EUR" or "COP"
    pub currency: String,
    /// Category tags, at least one (e.g. "Transporte", "Alojamiento")
    pub types: Vec<String>,
    pub transport_mode: Option<String>,
    pub estimated_time: String,
    pub comments: String,
    pub is_multi_day: bool,
    /// 1-based index of this slice within the multi-day event
    pub day_part: Option<u32>,
    pub total_days: Option<u32>,
    pub hours_in_day: Option<f64>,
    pub total_hours: Option<f64>,
}

/// One calendar day of a trip with its ordered events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    pub events: Vec<Event>,
}

/// Snapshot of the current trip for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    pub name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub start_date: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub end_date: String,
    pub people_count: u32,
    /// Every day in `[start_date, end_date]`, in order, empty days included
    pub days: Vec<TripDay>,
}

/// Request for generating a fresh trip calendar (wipes any prior trip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateTripRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub people_count: u32,
}

/// Request for adding or editing an event.
///
/// When `edit_index` is set the event at that position on `date` is
/// overwritten in place; otherwise the submission goes through the
/// multi-day splitter and is merged into the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitEventRequest {
    /// ISO 8601 date the event starts on
    pub date: String,
    pub edit_index: Option<usize>,
    pub place: String,
    pub origin: String,
    pub destination: String,
    pub start_time: String,
    pub duration: f64,
    /// "Horas" or "Minutos"
    pub duration_unit: String,
    pub price: f64,
    pub currency: String,
    pub types: Vec<String>,
    pub transport_mode: Option<String>,
    pub estimated_time: String,
    pub comments: String,
}

/// Outcome of an event submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitEventResponse {
    pub added: bool,
    /// Number of calendar days the event was actually stored on
    pub multi_day_count: u32,
    /// True when every produced day fell outside the trip's date range
    pub rejected: bool,
    pub success_message: String,
}

/// Response after deleting an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub success_message: String,
}

/// The session's exchange rates. `eur_to_usd` is always derived from the
/// two COP rates, never entered directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesResponse {
    pub usd_to_cop: f64,
    pub eur_to_cop: f64,
    pub eur_to_usd: f64,
}

/// Manual rate entry. A missing or non-positive value leaves the
/// corresponding rate unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRatesRequest {
    pub usd_cop: Option<f64>,
    pub eur_cop: Option<f64>,
}

/// Result of a remote rate refresh. Each currency may succeed or fail
/// independently; a `None` means that currency's fetch failed and the
/// prior rate was retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRatesResponse {
    pub usd_cop: Option<f64>,
    pub eur_cop: Option<f64>,
    pub rates: RatesResponse,
    pub message: String,
}

/// One category line of the financial breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub icon: String,
    pub amount: f64,
    pub formatted_amount: String,
}

/// Financial summary of the whole trip in the requested display currency.
///
/// An event tagged with several categories contributes its full amount to
/// each of them, so the category amounts may sum to more than `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummaryResponse {
    pub currency: String,
    pub total: f64,
    pub formatted_total: String,
    pub per_person: f64,
    pub formatted_per_person: String,
    pub categories: Vec<CategoryTotal>,
}

/// Response containing the exported plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPlanResponse {
    pub xml_content: String,
    pub filename: String,
    pub event_count: usize,
    pub trip_name: String,
}

/// Request for importing a previously exported plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPlanRequest {
    pub xml_content: String,
}

/// Response after importing a plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPlanResponse {
    pub trip: TripResponse,
    pub rates: RatesResponse,
    pub success_message: String,
}

/// Format an amount for display with exactly two decimal places.
///
/// Presentation rounding happens here and only here; the backend never
/// rounds converted amounts internally.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

impl Event {
    /// "HH:MM - HH:MM" label for calendar rendering.
    pub fn time_label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}
