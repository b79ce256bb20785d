// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Spaces out requests made through clones of one client.
///
/// MusicBrainz asks anonymous clients for at most one request per second.
/// The lock is held across the wait, so concurrent callers queue up in order.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until a request can be made according to the rate limit.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_instant) = *last {
            let elapsed = last_instant.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::trace!(
                    target: "musicbrainz",
                    "rate limiting: waiting {:?}",
                    wait_time
                );
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_enforces_delay() {
        let limiter = RateLimiter::new(Duration::from_millis(100));

        let start = Instant::now();

        // First request should be immediate
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));

        limiter.acquire().await;
        let second_elapsed = start.elapsed();
        assert!(
            second_elapsed >= Duration::from_millis(100),
            "expected >= 100ms, got {:?}",
            second_elapsed
        );
    }

    #[tokio::test]
    async fn test_rate_limiter_shared_between_clones() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let other = limiter.clone();
        let start = Instant::now();

        limiter.acquire().await;
        other.acquire().await;
        limiter.acquire().await;

        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(100),
            "expected >= 100ms, got {:?}",
            elapsed
        );
    }
}
