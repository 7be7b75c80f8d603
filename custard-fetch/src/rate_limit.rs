//! Per-instance request spacing.
//!
//! Vendors publish no rate-limit API, so each adapter keeps its own
//! minimum gap between dispatches, keyed by request stream.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Key used when an adapter issues a single request stream.
pub const DEFAULT_KEY: &str = "default";

/// Enforces a minimum interval between requests sharing a key.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum gap.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured gap.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until a request under `key` may be dispatched.
    ///
    /// Each caller reserves the next free slot for its key under the lock,
    /// then sleeps without it. Concurrent callers on one key get successive
    /// slots, and a wait on one key never delays another.
    pub async fn acquire(&self, key: &str) {
        let slot = {
            let mut last_request = self.last_request.lock().await;
            let now = Instant::now();
            let slot = match last_request.get(key) {
                Some(last) => (*last + self.min_interval).max(now),
                None => now,
            };
            last_request.insert(key.to_string(), slot);
            slot
        };

        let now = Instant::now();
        if slot > now {
            debug!(key, wait_ms = (slot - now).as_millis(), "Rate limiting request");
            tokio::time::sleep_until(slot).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_secs(2));

        limiter.acquire(DEFAULT_KEY).await;
        let first = Instant::now();
        limiter.acquire(DEFAULT_KEY).await;
        let second = Instant::now();

        assert!(second - first >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let limiter = RateLimiter::new(Duration::from_secs(2));

        let start = Instant::now();
        limiter.acquire("locator").await;
        limiter.acquire("page").await;

        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_key_does_not_block_others() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(5)));
        limiter.acquire("locator").await;

        let waiting = tokio::spawn({
            let limiter = Arc::clone(&limiter);
            async move { limiter.acquire("locator").await }
        });
        tokio::task::yield_now().await;

        let start = Instant::now();
        limiter.acquire("page").await;
        assert!(start.elapsed() < Duration::from_millis(10));
        assert!(!waiting.is_finished());

        waiting.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_serialize() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(2)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire(DEFAULT_KEY).await;
                    Instant::now()
                })
            })
            .collect();

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap());
        }
        times.sort();

        assert!(times[1] - times[0] >= Duration::from_secs(2));
        assert!(times[2] - times[1] >= Duration::from_secs(2));
        assert!(times[2] - start >= Duration::from_secs(4));
    }
}
