// src/utils/retry.rs

//! Bounded retry with a fixed delay between attempts.

use std::fmt;
use std::time::Duration;

/// How many times to attempt an operation and how long to wait between
/// failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

/// Run `op` until it succeeds or the attempt budget is exhausted.
///
/// `op` receives the 1-based attempt number. The delay is applied between
/// attempts, never after the last one. Returns the first success or the
/// final attempt's error.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let attempts = policy.attempts.max(1);
    for attempt in 1..attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => {
                log::warn!("Attempt {attempt}/{attempts} failed: {error}");
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }
    op(attempts).await
}
