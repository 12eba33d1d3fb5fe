//! Error types for the trip planner domain.

use chrono::NaiveDate;
use thiserror::Error;

/// All failures the domain layer can report.
///
/// `Validation` covers bad user input and is reported synchronously at the
/// point of the attempted operation; nothing is mutated when it is returned.
/// `RateFetch` is non-fatal: the prior rate stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("unsupported currency code: {0}")]
    InvalidCurrency(String),

    #[error("unknown event category: {0}")]
    InvalidEventType(String),

    #[error("unknown transport mode: {0}")]
    InvalidTransportMode(String),

    #[error("no event at index {index} for {date} ({len} events)")]
    IndexOutOfRange {
        date: NaiveDate,
        index: usize,
        len: usize,
    },

    #[error("invalid plan document: {0}")]
    DocumentParse(String),

    #[error("rate fetch failed for {currency}: {reason}")]
    RateFetch { currency: String, reason: String },

    #[error("no trip calendar has been generated yet")]
    NoTrip,
}
