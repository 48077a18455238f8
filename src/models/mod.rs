// src/models/mod.rs

//! Domain models for the booking application.

mod config;
mod slot;

// Re-export the types consumed outside this module
pub use config::{Config, PortalConfig};
pub use slot::{Area, AvailabilityMap, SlotKey, Stock, Target, build_availability_map};
