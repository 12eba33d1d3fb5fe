//! Financial aggregation across the trip ledger.
//!
//! Walks every event in the ledger, converts each price to the requested
//! display currency and produces the grand total, the per-category
//! breakdown and the per-person cost. No rounding happens here; two-decimal
//! rounding is applied only when formatting for display.

use std::collections::BTreeMap;

use log::debug;

use crate::domain::currency_service;
use crate::domain::errors::DomainError;
use crate::domain::models::{ConversionRates, Currency, EventType, Trip};

/// Cost summary of a trip in a single display currency.
///
/// `per_category` always contains every category of the fixed set. An
/// event tagged with several categories contributes its full converted
/// amount to each of them, so category amounts may sum to more than
/// `total` — the grand total counts each event exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub currency: Currency,
    pub total: f64,
    pub per_person: f64,
    pub per_category: BTreeMap<EventType, f64>,
}

/// Summarize the trip's costs in `display_currency`.
///
/// A `people_count` below 1 is a caller contract violation, reported as
/// an error rather than silently producing infinity.
pub fn summarize(
    trip: &Trip,
    rates: &ConversionRates,
    display_currency: Currency,
) -> Result<FinancialSummary, DomainError> {
    if trip.people_count < 1 {
        return Err(DomainError::Validation(
            "people count must be at least 1".to_string(),
        ));
    }

    let mut per_category: BTreeMap<EventType, f64> =
        EventType::ALL.iter().map(|t| (*t, 0.0)).collect();
    let mut total = 0.0;

    for (date, events) in trip.ledger.iter() {
        for event in events {
            let converted =
                currency_service::convert(event.price, event.currency, display_currency, rates);
            total += converted;
            for event_type in &event.types {
                if let Some(amount) = per_category.get_mut(event_type) {
                    *amount += converted;
                }
            }
            debug!(
                "💰 SUMMARY: {} on {}: {} {} -> {} {}",
                event.place,
                date,
                event.price,
                event.currency,
                converted,
                display_currency
            );
        }
    }

    Ok(FinancialSummary {
        currency: display_currency,
        total,
        per_person: total / trip.people_count as f64,
        per_category,
    })
}
