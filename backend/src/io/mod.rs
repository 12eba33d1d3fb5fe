//! Interface layer exposing the planner to the frontend.

pub mod rest;
