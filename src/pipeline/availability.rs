// src/pipeline/availability.rs

//! Availability inspection pipeline.
//!
//! Fetches today's open areas and prints them, so an operator can check
//! what is bookable before committing targets to the config.

use chrono::Local;

use crate::error::Result;
use crate::models::{AvailabilityMap, Config, SlotKey};
use crate::services::AvailabilityFetcher;

/// Fetch and log today's open areas, sorted by time then court.
pub async fn run_availability(config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let availability = AvailabilityFetcher::new(config)?.fetch(today).await?;

    if availability.is_empty() {
        log::warn!("No open areas for {}", today.format("%Y-%m-%d"));
        return Ok(());
    }

    for key in sorted_keys(&availability) {
        log::info!("open: {key}");
    }

    let matched = config
        .targets
        .iter()
        .filter(|t| availability.contains_key(&t.slot_key()))
        .count();
    log::info!(
        "{} open areas; {}/{} configured targets currently bookable",
        availability.len(),
        matched,
        config.targets.len()
    );

    Ok(())
}

fn sorted_keys(availability: &AvailabilityMap) -> Vec<&SlotKey> {
    let mut keys: Vec<&SlotKey> = availability.keys().collect();
    keys.sort_by(|a, b| {
        a.time_no
            .cmp(&b.time_no)
            .then_with(|| a.area_name.cmp(&b.area_name))
    });
    keys
}
