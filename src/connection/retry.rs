//! Retry policy for establishing RPC connections.
//!
//! Only connection setup is retried. Once a session is live, binding failures
//! are reported to the caller as-is.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = try once)
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(
        max_retries: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
    ) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Backoff to wait after the given failed attempt (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = self
            .backoff_multiplier
            .powi(attempt.saturating_sub(1).min(i32::MAX as u32) as i32);
        let secs =
            (self.initial_backoff.as_secs_f64() * factor).min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(secs.max(0.0))
    }

    /// Run `operation` until it succeeds or the retry budget is spent.
    ///
    /// `what` names the operation in logs.
    pub async fn execute<F, Fut, T>(&self, what: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            target: "ogn_registry::connection::retry",
                            operation = what,
                            attempts = attempt,
                            "Succeeded after retrying"
                        );
                    }
                    return Ok(value);
                }
                Err(err) if attempt > self.max_retries => {
                    tracing::error!(
                        target: "ogn_registry::connection::retry",
                        operation = what,
                        attempts = attempt,
                        error = %err,
                        "Giving up"
                    );
                    return Err(err);
                }
                Err(err) => {
                    let backoff = self.backoff_after(attempt);
                    tracing::warn!(
                        target: "ogn_registry::connection::retry",
                        operation = what,
                        attempt,
                        max_attempts = self.max_retries + 1,
                        error = %err,
                        "Failed, retrying in {:?}",
                        backoff
                    );
                    sleep(backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1), Duration::from_millis(4), 2.0)
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::new(
            5,
            Duration::from_millis(125),
            Duration::from_millis(500),
            2.0,
        );
        assert_eq!(policy.backoff_after(1), Duration::from_millis(125));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(250));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(500));
        assert_eq!(policy.backoff_after(10), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();

        let value = RetryPolicy::default()
            .execute("eth_chainId", || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, anyhow::Error>(5u64)
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();

        let value = fast(3)
            .execute("eth_chainId", || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        anyhow::bail!("connection refused");
                    }
                    Ok(1u64)
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();

        let result: Result<()> = fast(2)
            .execute("eth_chainId", || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    anyhow::bail!("connection refused")
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_retry_tries_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();

        let result: Result<()> = RetryPolicy::no_retry()
            .execute("eth_chainId", || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    anyhow::bail!("unreachable")
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
