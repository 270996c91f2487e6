//! Bounded retry with a fixed pause between attempts

use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// How often and how patiently a page request is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first one; at least 1
    pub max_attempts: u32,

    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// Returns the last error on exhaustion. There is no pause after the
    /// final attempt.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    warn!(attempt, max_attempts = self.max_attempts, error = %e, "Final attempt failed");
                    return Err(e);
                },
                Err(e) => {
                    warn!(attempt, max_attempts = self.max_attempts, error = %e, "Attempt failed");
                    info!("Retrying in {} seconds...", self.backoff.as_secs());
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                },
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(10, Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        let result: Result<u32, String> = policy
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("timeout #{n}"))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(4, Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        let result: Result<(), String> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("gateway timeout".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "gateway timeout");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(15) && elapsed < Duration::from_secs(16));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
