//! Currency conversion for the trip planner.
//!
//! All cross-currency conversions are routed through USD as the pivot
//! currency. Conversion is a pure function over an explicit
//! [`ConversionRates`] value; no rounding is applied here — presentation
//! rounding belongs to the display layer.

use crate::domain::models::{ConversionRates, Currency};

/// Convert `amount` from one currency to another using the given rates.
///
/// A same-currency conversion returns the amount unchanged, exactly.
pub fn convert(amount: f64, from: Currency, to: Currency, rates: &ConversionRates) -> f64 {
    if from == to {
        return amount;
    }

    // Map to USD first
    let usd_amount = match from {
        Currency::Usd => amount,
        Currency::Eur => amount * rates.eur_to_usd,
        Currency::Cop => amount / rates.usd_to_cop,
    };

    // Then map USD to the target currency
    match to {
        Currency::Usd => usd_amount,
        Currency::Eur => usd_amount / rates.eur_to_usd,
        Currency::Cop => usd_amount * rates.usd_to_cop,
    }
}
