//! Caller-side retry
//!
//! The pagination core never retries. [`RetryPolicy::run`] re-runs a whole
//! operation (typically one `EventsClient::get`) when it fails with a
//! retryable error, so a retried fetch always starts again from page one.

use crate::error::Result;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How often and how patiently to retry a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 disables retrying)
    pub max_retries: u32,
    /// Initial delay for backoff, in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum delay for backoff, in milliseconds
    pub max_backoff_ms: u64,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
            backoff_type: BackoffType::Exponential,
        }
    }
}

impl RetryPolicy {
    /// A policy that runs the operation exactly once
    pub fn none() -> Self {
        Self::default()
    }

    /// Set max retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff_ms = initial.as_millis() as u64;
        self.max_backoff_ms = max.as_millis() as u64;
        self
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let initial = Duration::from_millis(self.initial_backoff_ms);
        let delay = match self.backoff_type {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };

        std::cmp::min(delay, Duration::from_millis(self.max_backoff_ms))
    }

    /// Run `op`, retrying on retryable errors
    ///
    /// Non-retryable errors and the error from the final attempt are
    /// returned unchanged.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.calculate_backoff(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(backoff_type: BackoffType, initial_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy::none().backoff(
            backoff_type,
            Duration::from_millis(initial_ms),
            Duration::from_millis(max_ms),
        )
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.backoff_type, BackoffType::Exponential);
    }

    #[test]
    fn test_calculate_backoff_constant() {
        let policy = policy(BackoffType::Constant, 100, 10_000);
        assert_eq!(policy.calculate_backoff(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_backoff(5), Duration::from_millis(100));
    }

    #[test]
    fn test_calculate_backoff_linear() {
        let policy = policy(BackoffType::Linear, 100, 10_000);
        assert_eq!(policy.calculate_backoff(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_backoff(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_backoff(2), Duration::from_millis(300));
    }

    #[test]
    fn test_calculate_backoff_exponential() {
        let policy = policy(BackoffType::Exponential, 100, 10_000);
        assert_eq!(policy.calculate_backoff(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_backoff(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn test_calculate_backoff_respects_max() {
        let policy = policy(BackoffType::Exponential, 100, 500);
        assert_eq!(policy.calculate_backoff(10), Duration::from_millis(500));
        assert_eq!(policy.calculate_backoff(40), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_run_retries_retryable_errors() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = policy(BackoffType::Constant, 1, 1).max_retries(3);

        let result = policy
            .run(move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Error::http_status(503, "unavailable"))
                } else {
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = policy(BackoffType::Constant, 1, 1).max_retries(2);

        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Timeout { timeout_ms: 10 })
            })
            .await;

        assert!(matches!(result, Err(Error::Timeout { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_other_errors() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = policy(BackoffType::Constant, 1, 1).max_retries(5);

        let result: Result<()> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::malformed("missing items"))
            })
            .await;

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
