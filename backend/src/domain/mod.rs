//! # Domain Module
//!
//! Contains all business logic for the trip planner.
//!
//! This module encapsulates the core rules of itinerary planning: how a
//! submitted event is split across midnight boundaries, how its cost is
//! allocated per day, how heterogeneous currencies are normalized through
//! the USD pivot, and how the trip's date-keyed ledger is mutated. It
//! operates independently of any UI framework or storage format.
//!
//! ## Module Organization
//!
//! - **currency_service**: pivot-based conversion between USD, EUR and COP
//! - **event_splitter**: midnight-crossing decomposition with proportional
//!   price allocation
//! - **trip_service**: trip lifecycle, submission validation and the
//!   date-range merge policy
//! - **financial_service**: grand-total / per-category / per-person cost
//!   aggregation
//! - **rate_refresh**: the asynchronous exchange-rate collaborator
//!
//! ## Business Rules
//!
//! - An event needs a place, a valid start time, a positive duration, a
//!   non-negative price and at least one category tag
//! - Durations normalize to minutes at the splitter boundary; the entered
//!   unit survives only for display and round-trip
//! - Multi-day slices outside the trip's date range are silently dropped;
//!   a submission where every slice is dropped is rejected wholesale
//! - The EUR/USD cross rate is always derived from the two COP rates

pub mod commands;
pub mod currency_service;
pub mod errors;
pub mod event_splitter;
pub mod financial_service;
pub mod models;
pub mod rate_refresh;
pub mod trip_service;

pub use errors::DomainError;
pub use financial_service::FinancialSummary;
pub use rate_refresh::{CurrencyApiProvider, RateProvider, RateService};
pub use trip_service::TripService;
