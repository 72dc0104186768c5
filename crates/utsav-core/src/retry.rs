//! Bounded retry with exponential backoff for remote calls.
//!
//! Applied to read-style calls against the object store, worksheet,
//! summarizer, and transcriber. Writes against the worksheet are attempted
//! once: the API is not idempotent and a retried write that actually
//! landed would duplicate a ledger row.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy for remote calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            // A policy that never attempts is a configuration error; clamp.
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Delay before the given retry (attempt numbering starts at 1 for the
    /// first retry). Doubles per attempt, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Run `f` until it succeeds or the attempt budget is exhausted,
    /// sleeping between attempts. Returns the last error on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        operation = operation,
                        attempt = attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Remote call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::warn!(
                        operation = operation,
                        attempts = attempt,
                        error = %err,
                        "Remote call failed, attempts exhausted"
                    );
                    return Err(err);
                }
            }
        }
    }
}
