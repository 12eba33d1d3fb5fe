//! Storage layer: the XML plan document format.

pub mod xml;
