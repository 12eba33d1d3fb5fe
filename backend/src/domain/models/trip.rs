//! Trip model and the date-keyed event ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::models::event::Event;

/// Date-keyed store of confirmed events for a trip.
///
/// Each date holds its events ordered by start time ascending. Ordering is
/// lexicographic on the zero-padded `HH:MM` string, which is equivalent to
/// numeric ordering. Mutation is synchronous and last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripLedger {
    events: BTreeMap<NaiveDate, Vec<Event>>,
}

impl TripLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the given date and re-sort that date's sequence
    /// by start time.
    pub fn insert(&mut self, date: NaiveDate, event: Event) {
        let day = self.events.entry(date).or_default();
        day.push(event);
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    /// Overwrite the event at `index` in place, then re-sort the date's
    /// sequence. The index must be valid for the date's current sequence.
    pub fn replace(&mut self, date: NaiveDate, index: usize, event: Event) -> Result<(), DomainError> {
        let day = self.events.get_mut(&date).ok_or(DomainError::IndexOutOfRange {
            date,
            index,
            len: 0,
        })?;
        if index >= day.len() {
            return Err(DomainError::IndexOutOfRange {
                date,
                index,
                len: day.len(),
            });
        }
        day[index] = event;
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(())
    }

    /// Delete the event at `index`. When the date's sequence becomes empty
    /// the date key is removed entirely, leaving no empty tombstones.
    pub fn remove(&mut self, date: NaiveDate, index: usize) -> Result<Event, DomainError> {
        let day = self.events.get_mut(&date).ok_or(DomainError::IndexOutOfRange {
            date,
            index,
            len: 0,
        })?;
        if index >= day.len() {
            return Err(DomainError::IndexOutOfRange {
                date,
                index,
                len: day.len(),
            });
        }
        let removed = day.remove(index);
        if day.is_empty() {
            self.events.remove(&date);
        }
        Ok(removed)
    }

    pub fn events_for(&self, date: NaiveDate) -> &[Event] {
        self.events.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate dates (ascending) with their ordered events.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Event>)> {
        self.events.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.events.keys()
    }

    pub fn total_event_count(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A trip: name, inclusive date range, traveler count and the event
/// ledger. Owned exclusively by the session and recreated wholesale on
/// calendar regeneration or plan import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub people_count: u32,
    pub ledger: TripLedger,
}

impl Trip {
    pub fn new(name: String, start_date: NaiveDate, end_date: NaiveDate, people_count: u32) -> Self {
        Self {
            name,
            start_date,
            end_date,
            people_count,
            ledger: TripLedger::new(),
        }
    }

    /// Whether a date lies within the trip's inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Every calendar date of the trip in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = self.start_date;
        while current <= self.end_date {
            days.push(current);
            current = current.succ_opt().expect("date overflow");
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::{Currency, DurationUnit, EventType};

    fn test_event(start_time: &str) -> Event {
        Event {
            place: "Plaza Botero".to_string(),
            origin: String::new(),
            destination: String::new(),
            start_time: start_time.to_string(),
            end_time: "23:00".to_string(),
            duration: 1.0,
            duration_unit: DurationUnit::Hours,
            price: 10.0,
            original_price: None,
            currency: Currency::Usd,
            types: vec![EventType::Lugar],
            transport_mode: None,
            estimated_time: String::new(),
            comments: String::new(),
            is_multi_day: false,
            day_part: None,
            total_days: None,
            hours_in_day: None,
            total_hours: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_keeps_events_sorted_by_start_time() {
        let mut ledger = TripLedger::new();
        let d = date("2025-07-01");

        ledger.insert(d, test_event("09:00"));
        ledger.insert(d, test_event("07:00"));
        ledger.insert(d, test_event("12:00"));

        let starts: Vec<&str> = ledger
            .events_for(d)
            .iter()
            .map(|e| e.start_time.as_str())
            .collect();
        assert_eq!(starts, vec!["07:00", "09:00", "12:00"]);
    }

    #[test]
    fn test_remove_last_event_drops_date_key() {
        let mut ledger = TripLedger::new();
        let d = date("2025-07-01");
        ledger.insert(d, test_event("10:00"));

        ledger.remove(d, 0).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.dates().count(), 0);
    }

    #[test]
    fn test_remove_keeps_date_key_with_remaining_events() {
        let mut ledger = TripLedger::new();
        let d = date("2025-07-01");
        ledger.insert(d, test_event("10:00"));
        ledger.insert(d, test_event("14:00"));

        let removed = ledger.remove(d, 0).unwrap();
        assert_eq!(removed.start_time, "10:00");
        assert_eq!(ledger.events_for(d).len(), 1);
    }

    #[test]
    fn test_replace_out_of_range_is_an_error() {
        let mut ledger = TripLedger::new();
        let d = date("2025-07-01");
        ledger.insert(d, test_event("10:00"));

        let err = ledger.replace(d, 3, test_event("11:00")).unwrap_err();
        assert_eq!(
            err,
            DomainError::IndexOutOfRange {
                date: d,
                index: 3,
                len: 1
            }
        );

        let err = ledger.replace(date("2025-07-02"), 0, test_event("11:00")).unwrap_err();
        assert!(matches!(err, DomainError::IndexOutOfRange { len: 0, .. }));
    }

    #[test]
    fn test_replace_resorts_the_day() {
        let mut ledger = TripLedger::new();
        let d = date("2025-07-01");
        ledger.insert(d, test_event("08:00"));
        ledger.insert(d, test_event("12:00"));

        // Move the first event to the end of the day
        ledger.replace(d, 0, test_event("18:00")).unwrap();
        let starts: Vec<&str> = ledger
            .events_for(d)
            .iter()
            .map(|e| e.start_time.as_str())
            .collect();
        assert_eq!(starts, vec!["12:00", "18:00"]);
    }

    #[test]
    fn test_trip_contains_and_days() {
        let trip = Trip::new(
            "Eje Cafetero".to_string(),
            date("2025-07-01"),
            date("2025-07-03"),
            2,
        );

        assert!(trip.contains(date("2025-07-01")));
        assert!(trip.contains(date("2025-07-03")));
        assert!(!trip.contains(date("2025-06-30")));
        assert!(!trip.contains(date("2025-07-04")));
        assert_eq!(trip.days().len(), 3);
    }
}
