// src/services/mod.rs

//! Service layer for the booking application.
//!
//! This module contains the business logic for:
//! - Open-area discovery (`AvailabilityFetcher`)
//! - Portal login (`Authenticator`)
//! - Order submission (`OrderSubmitter`)
//! - Push notifications (`Notifier`)

mod auth;
mod availability;
mod notify;
mod order;

pub use auth::Authenticator;
pub use availability::AvailabilityFetcher;
pub use notify::Notifier;
pub use order::{OrderOutcome, OrderStatus, OrderSubmitter};

/// Service identifier of the badminton venue on the portal; every
/// discovery query and order payload names it.
pub const SERVICE_ID: &str = "1";
