//! Trip orchestration for the trip planner.
//!
//! This service owns the session's trip, validates incoming submissions,
//! runs them through the multi-day splitter and applies the date-range
//! merge policy. Splitter output landing outside the trip's range is
//! silently dropped; the outcome reports how many days were actually kept
//! so the caller can phrase its messaging (0 kept rejects the whole
//! submission).

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use log::{info, warn};

use crate::domain::commands::events::{DeleteEventCommand, SubmitEventCommand, SubmitEventResult};
use crate::domain::commands::trip::GenerateTripCommand;
use crate::domain::errors::DomainError;
use crate::domain::event_splitter;
use crate::domain::models::event::{
    parse_time_minutes, Currency, DurationUnit, EventInput, EventType, TransportMode,
};
use crate::domain::models::Trip;

/// Service owning the current trip and all mutations of its ledger.
#[derive(Clone, Default)]
pub struct TripService {
    trip: Arc<Mutex<Option<Trip>>>,
}

impl TripService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh trip calendar, wiping any prior trip.
    pub fn generate(&self, command: GenerateTripCommand) -> Result<Trip, DomainError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("trip name is required".to_string()));
        }

        let start_date = parse_date(&command.start_date)?;
        let end_date = parse_date(&command.end_date)?;
        if start_date > end_date {
            return Err(DomainError::Validation(
                "start date must not be after end date".to_string(),
            ));
        }
        if command.people_count < 1 {
            return Err(DomainError::Validation(
                "people count must be at least 1".to_string(),
            ));
        }

        let trip = Trip::new(name.to_string(), start_date, end_date, command.people_count);
        info!(
            "🗓️ TRIP: Generated calendar '{}' from {} to {} for {} people",
            trip.name, trip.start_date, trip.end_date, trip.people_count
        );

        *self.trip.lock().unwrap() = Some(trip.clone());
        Ok(trip)
    }

    /// Clone of the current trip, if one has been generated or imported.
    pub fn snapshot(&self) -> Option<Trip> {
        self.trip.lock().unwrap().clone()
    }

    /// Wholesale replacement, used by plan import.
    pub fn replace_trip(&self, trip: Trip) {
        info!(
            "🗓️ TRIP: Replaced trip with '{}' ({} events)",
            trip.name,
            trip.ledger.total_event_count()
        );
        *self.trip.lock().unwrap() = Some(trip);
    }

    /// Add or edit an event.
    ///
    /// Additions run through the splitter and the range-filtering merge;
    /// edits overwrite the targeted record in place and never re-split.
    pub fn submit_event(&self, command: SubmitEventCommand) -> Result<SubmitEventResult, DomainError> {
        let date = parse_date(&command.date)?;
        let input = validate_submission(&command)?;

        let mut guard = self.trip.lock().unwrap();
        let trip = guard.as_mut().ok_or(DomainError::NoTrip)?;

        if let Some(index) = command.edit_index {
            let event = event_splitter::single_day(&input);
            trip.ledger.replace(date, index, event)?;
            info!("✏️ EVENT: Updated event {} on {}", index, date);
            return Ok(SubmitEventResult {
                added: true,
                multi_day_count: 1,
                rejected: false,
                success_message: "Event updated successfully".to_string(),
            });
        }

        let slices = event_splitter::split(&input, date);
        let produced = slices.len();

        let mut kept = 0u32;
        for (event, event_date) in slices {
            if trip.contains(event_date) {
                trip.ledger.insert(event_date, event);
                kept += 1;
            }
        }

        if kept == 0 {
            warn!(
                "🗓️ EVENT: Rejected '{}' starting {}: all {} day(s) fall outside {}..={}",
                input.place, date, produced, trip.start_date, trip.end_date
            );
            return Ok(SubmitEventResult {
                added: false,
                multi_day_count: 0,
                rejected: true,
                success_message: "The event extends outside the trip's date range".to_string(),
            });
        }

        let success_message = if kept > 1 {
            format!(
                "Multi-day event created across {} days; the price was split proportionally by hours per day",
                kept
            )
        } else {
            "Event added successfully".to_string()
        };
        info!(
            "🗓️ EVENT: Added '{}' starting {} ({} of {} day(s) kept)",
            input.place, date, kept, produced
        );

        Ok(SubmitEventResult {
            added: true,
            multi_day_count: kept,
            rejected: false,
            success_message,
        })
    }

    /// Delete the event at `index` on `date`.
    pub fn delete_event(&self, command: DeleteEventCommand) -> Result<(), DomainError> {
        let date = parse_date(&command.date)?;

        let mut guard = self.trip.lock().unwrap();
        let trip = guard.as_mut().ok_or(DomainError::NoTrip)?;
        let removed = trip.ledger.remove(date, command.index)?;
        info!("🗑️ EVENT: Deleted '{}' from {}", removed.place, date);
        Ok(())
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("invalid date: {}", date)))
}

/// Validate a raw submission into a typed [`EventInput`].
///
/// Unknown currency codes and category tags are rejected here, at the
/// input boundary, rather than silently dropped later.
fn validate_submission(command: &SubmitEventCommand) -> Result<EventInput, DomainError> {
    let place = command.place.trim();
    if place.is_empty() {
        return Err(DomainError::Validation("place is required".to_string()));
    }

    if parse_time_minutes(&command.start_time).is_none() {
        return Err(DomainError::Validation(format!(
            "invalid start time: {}",
            command.start_time
        )));
    }

    if !command.duration.is_finite() || command.duration <= 0.0 {
        return Err(DomainError::Validation(
            "duration must be greater than zero".to_string(),
        ));
    }
    let duration_unit = DurationUnit::from_str(&command.duration_unit)?;

    if !command.price.is_finite() || command.price < 0.0 {
        return Err(DomainError::Validation(
            "price must be zero or positive (0 is allowed for free events)".to_string(),
        ));
    }
    let currency = Currency::from_str(&command.currency)?;

    if command.types.is_empty() {
        return Err(DomainError::Validation(
            "select at least one category tag".to_string(),
        ));
    }
    let types = command
        .types
        .iter()
        .map(|t| EventType::from_str(t))
        .collect::<Result<Vec<_>, _>>()?;

    // Transport details only apply to transport-tagged events
    let transport_mode = if types.contains(&EventType::Transporte) {
        match command.transport_mode.as_deref() {
            Some(mode) if !mode.is_empty() => Some(TransportMode::from_str(mode)?),
            _ => None,
        }
    } else {
        None
    };
    let estimated_time = if transport_mode.is_some() {
        command.estimated_time.trim().to_string()
    } else {
        String::new()
    };

    Ok(EventInput {
        place: place.to_string(),
        origin: command.origin.trim().to_string(),
        destination: command.destination.trim().to_string(),
        start_time: command.start_time.clone(),
        duration: command.duration,
        duration_unit,
        price: command.price,
        currency,
        types,
        transport_mode,
        estimated_time,
        comments: command.comments.trim().to_string(),
    })
}
