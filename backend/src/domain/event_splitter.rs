//! Multi-day event splitting.
//!
//! A submitted event whose start time plus duration extends past 24:00 is
//! decomposed into one day-scoped slice per calendar day, with the total
//! price allocated proportionally to the hours spent in each day. Events
//! that do not cross midnight pass through as a single record.

use chrono::NaiveDate;

use crate::domain::models::event::{format_time_minutes, DurationUnit, Event, EventInput};

const MINUTES_PER_DAY: u32 = 1440;

/// Round to 2 decimal places (price allocation).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (stored/displayed hour counts).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Decompose one validated submission into day-scoped event records
/// starting at `date`, one element per calendar day.
///
/// The price ratio uses the unrounded total hours; only the stored
/// `hours_in_day`/`total_hours` fields are rounded, so the per-day shares
/// do not accumulate rounding error across long events.
pub fn split(input: &EventInput, date: NaiveDate) -> Vec<(Event, NaiveDate)> {
    let total_minutes = input.total_minutes();
    let start_minutes = input.start_minutes();

    if start_minutes + total_minutes <= MINUTES_PER_DAY {
        return vec![(single_day_event(input, start_minutes + total_minutes), date)];
    }

    let total_hours = total_minutes as f64 / 60.0;

    let mut slices: Vec<(Event, NaiveDate)> = Vec::new();
    let mut remaining = total_minutes;
    let mut current_date = date;
    let mut day_part: u32 = 1;

    while remaining > 0 {
        let (start_time, end_minutes, minutes_this_day) = if day_part == 1 {
            // First day runs from the start time to midnight
            (
                input.start_time.clone(),
                MINUTES_PER_DAY,
                MINUTES_PER_DAY - start_minutes,
            )
        } else {
            // Subsequent days run from midnight for up to a full day
            let minutes = remaining.min(MINUTES_PER_DAY);
            ("00:00".to_string(), minutes, minutes)
        };

        let hours_this_day = minutes_this_day as f64 / 60.0;
        let price = round2(input.price * hours_this_day / total_hours);

        let event = Event {
            place: input.place.clone(),
            origin: input.origin.clone(),
            destination: input.destination.clone(),
            start_time,
            end_time: format_time_minutes(end_minutes),
            duration: round1(hours_this_day),
            duration_unit: DurationUnit::Hours,
            price,
            original_price: Some(input.price),
            currency: input.currency,
            types: input.types.clone(),
            transport_mode: input.transport_mode,
            estimated_time: input.estimated_time.clone(),
            comments: input.comments.clone(),
            is_multi_day: true,
            day_part: Some(day_part),
            total_days: None, // patched below once the count is known
            hours_in_day: Some(round1(hours_this_day)),
            total_hours: Some(round1(total_hours)),
        };
        slices.push((event, current_date));

        remaining -= minutes_this_day;
        current_date = current_date.succ_opt().expect("date overflow");
        day_part += 1;
    }

    let total_days = slices.len() as u32;
    for (event, _) in &mut slices {
        event.total_days = Some(total_days);
    }
    slices
}

/// Build the single day-scoped record for an edit submission. Edits
/// overwrite one stored record and bypass the splitter; an end time past
/// midnight wraps onto the next day's clock.
pub fn single_day(input: &EventInput) -> Event {
    let end = input.start_minutes() + input.total_minutes();
    let end_minutes = if end <= MINUTES_PER_DAY {
        end
    } else {
        end % MINUTES_PER_DAY
    };
    single_day_event(input, end_minutes)
}

/// The non-crossing case: the input copied verbatim into a single record.
fn single_day_event(input: &EventInput, end_minutes: u32) -> Event {
    Event {
        place: input.place.clone(),
        origin: input.origin.clone(),
        destination: input.destination.clone(),
        start_time: input.start_time.clone(),
        end_time: format_time_minutes(end_minutes),
        duration: input.duration,
        duration_unit: input.duration_unit,
        price: input.price,
        original_price: None,
        currency: input.currency,
        types: input.types.clone(),
        transport_mode: input.transport_mode,
        estimated_time: input.estimated_time.clone(),
        comments: input.comments.clone(),
        is_multi_day: false,
        day_part: None,
        total_days: None,
        hours_in_day: None,
        total_hours: None,
    }
}
