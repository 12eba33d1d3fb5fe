use crate::domain::models::event::Event as DomainEvent;
use crate::domain::models::Trip;
use shared::{Event as SharedEvent, TripDay, TripResponse};

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(event: &DomainEvent) -> SharedEvent {
        SharedEvent {
            place: event.place.clone(),
            origin: event.origin.clone(),
            destination: event.destination.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            duration: event.duration,
            duration_unit: event.duration_unit.as_str().to_string(),
            price: event.price,
            original_price: event.original_price,
            currency: event.currency.as_str().to_string(),
            types: event.types.iter().map(|t| t.as_str().to_string()).collect(),
            transport_mode: event.transport_mode.map(|m| m.as_str().to_string()),
            estimated_time: event.estimated_time.clone(),
            comments: event.comments.clone(),
            is_multi_day: event.is_multi_day,
            day_part: event.day_part,
            total_days: event.total_days,
            hours_in_day: event.hours_in_day,
            total_hours: event.total_hours,
        }
    }
}

pub struct TripMapper;

impl TripMapper {
    /// Snapshot of the trip for rendering: every calendar day of the range
    /// in order, empty days included.
    pub fn to_dto(trip: &Trip) -> TripResponse {
        let days = trip
            .days()
            .into_iter()
            .map(|date| TripDay {
                date: date.format("%Y-%m-%d").to_string(),
                events: trip
                    .ledger
                    .events_for(date)
                    .iter()
                    .map(EventMapper::to_dto)
                    .collect(),
            })
            .collect();

        TripResponse {
            name: trip.name.clone(),
            start_date: trip.start_date.format("%Y-%m-%d").to_string(),
            end_date: trip.end_date.format("%Y-%m-%d").to_string(),
            people_count: trip.people_count,
            days,
        }
    }
}
