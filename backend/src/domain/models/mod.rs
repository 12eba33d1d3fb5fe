//! Domain models for the trip planner.

pub mod event;
pub mod rates;
pub mod trip;

pub use event::{Currency, DurationUnit, Event, EventInput, EventType, TransportMode};
pub use rates::ConversionRates;
pub use trip::{Trip, TripLedger};
