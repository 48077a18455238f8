// src/pipeline/mod.rs

//! Pipeline entry points for booking operations.
//!
//! - `run_booking`: full pass — availability, login, one order per target
//! - `run_availability`: fetch and print today's open areas

pub mod availability;
pub mod book;

pub use availability::run_availability;
pub use book::run_booking;
