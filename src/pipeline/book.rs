// src/pipeline/book.rs

//! Booking pipeline: fetch availability, log in, order each target.

use chrono::Local;

use crate::error::Result;
use crate::models::{Config, Target};
use crate::services::{AvailabilityFetcher, Authenticator, Notifier, OrderOutcome, OrderSubmitter};

/// Per-run tally of target outcomes, used for the closing log line and the
/// push notification body.
#[derive(Debug, Default)]
pub struct BookingReport {
    pub reserved: usize,
    pub unavailable: usize,
    pub failed: usize,
    lines: Vec<String>,
}

impl BookingReport {
    fn record(&mut self, target: &Target, outcome: &Result<OrderOutcome>) {
        let line = match outcome {
            Ok(OrderOutcome::Submitted(status)) => {
                if status.is_reserved() {
                    self.reserved += 1;
                } else {
                    self.failed += 1;
                }
                format!("{target}: {status}")
            }
            Ok(OrderOutcome::NotAvailable) => {
                self.unavailable += 1;
                format!("{target}: not in today's open areas")
            }
            Err(error) => {
                self.failed += 1;
                format!("{target}: {error}")
            }
        };
        self.lines.push(line);
    }

    fn summary(&self, date: &str) -> String {
        format!(
            "courtbot {date}: {} reserved, {} unavailable, {} failed\n{}",
            self.reserved,
            self.unavailable,
            self.failed,
            self.lines.join("\n")
        )
    }
}

/// Run one full booking pass: availability → login → one order per target.
///
/// Availability or login failure aborts the run; per-target failures are
/// logged and the loop continues so every target is attempted.
pub async fn run_booking(config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();
    log::info!("Booking run for {date} ({} targets)", config.targets.len());
    if !config.earliest_order_time.is_empty() {
        log::debug!("Portal opens orders at {}", config.earliest_order_time);
    }

    let availability = AvailabilityFetcher::new(config)?.fetch(today).await?;
    let cookies = Authenticator::new(config)?.login().await?;

    let submitter = OrderSubmitter::new(config)?;
    let mut report = BookingReport::default();

    for target in &config.targets {
        let outcome = submitter.submit(target, &cookies, &availability).await;
        match &outcome {
            Ok(OrderOutcome::Submitted(status)) if status.is_reserved() => {
                log::info!("Target {target}: {status}");
            }
            Ok(OrderOutcome::Submitted(status)) => {
                log::warn!("Target {target}: {status}");
            }
            Ok(OrderOutcome::NotAvailable) => {
                log::warn!("Target {target} not in today's open areas");
            }
            Err(error) => {
                log::error!("Target {target}: {error}");
            }
        }
        report.record(target, &outcome);
    }

    log::info!(
        "Run complete: {} reserved, {} unavailable, {} failed",
        report.reserved,
        report.unavailable,
        report.failed
    );

    // The notification is best-effort; neither building the client nor
    // delivery may turn a completed pass into a failed run.
    match Notifier::new(config) {
        Ok(notifier) if notifier.is_enabled() => {
            if let Err(error) = notifier.send(&report.summary(&date)).await {
                log::warn!("Push notification failed: {error}");
            }
        }
        Ok(_) => {}
        Err(error) => log::warn!("Push notification unavailable: {error}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::OrderStatus;

    fn target(time: u32, number: u32) -> Target {
        Target { time, number }
    }

    #[test]
    fn report_tallies_outcomes() {
        let mut report = BookingReport::default();
        report.record(
            &target(14, 3),
            &Ok(OrderOutcome::Submitted(OrderStatus::Booked)),
        );
        report.record(
            &target(15, 3),
            &Ok(OrderOutcome::Submitted(OrderStatus::Unpaid)),
        );
        report.record(&target(16, 3), &Ok(OrderOutcome::NotAvailable));
        report.record(
            &target(17, 3),
            &Ok(OrderOutcome::Submitted(OrderStatus::Rejected(
                "座位已被预订".to_string(),
            ))),
        );
        report.record(
            &target(18, 3),
            &Err(AppError::order("18:01-19:00 场地3", "undecodable reply")),
        );

        assert_eq!(report.reserved, 2);
        assert_eq!(report.unavailable, 1);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn summary_lists_every_target() {
        let mut report = BookingReport::default();
        report.record(
            &target(14, 3),
            &Ok(OrderOutcome::Submitted(OrderStatus::Booked)),
        );
        report.record(&target(15, 3), &Ok(OrderOutcome::NotAvailable));

        let summary = report.summary("2026-08-29");
        assert!(summary.starts_with("courtbot 2026-08-29: 1 reserved, 1 unavailable, 0 failed"));
        assert!(summary.contains("14:01-15:00 场地3: reservation booked"));
        assert!(summary.contains("15:01-16:00 场地3: not in today's open areas"));
    }
}
