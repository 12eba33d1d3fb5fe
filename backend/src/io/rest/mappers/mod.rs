//! Mappers between domain models and the `shared` DTOs.

pub mod rates_mapper;
pub mod summary_mapper;
pub mod trip_mapper;
