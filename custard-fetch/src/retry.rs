//! Retry with linear backoff and cancellation.
//!
//! Retry `n` (1-based) waits `retry_delay * n` before it is issued. Only
//! transport-class failures are retried; anything else is returned at once.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Strategy for retrying failed requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryStrategy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit.
    pub retry_delay: Duration,
}

impl RetryStrategy {
    /// Creates a new retry strategy.
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }

    /// Whether `error` should be retried.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        error.is_transport()
    }

    /// Runs `operation` up to `max_retries + 1` times.
    ///
    /// Returns the first success, the first non-retryable error, or the last
    /// transport error once the budget is spent. Cancellation is checked
    /// before each attempt and races both the attempt and every backoff
    /// sleep; it yields [`FetchError::Cancelled`].
    pub async fn run<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(FetchError::Cancelled),
                result = operation() => result,
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !self.should_retry(&err) || attempt >= self.max_retries {
                if attempt > 0 {
                    debug!(attempts = attempt + 1, error = %err, "Giving up after retries");
                }
                return Err(err);
            }

            attempt += 1;
            let delay = self.delay_for_attempt(attempt);
            warn!(
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Transient fetch error, retrying after backoff"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(FetchError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
