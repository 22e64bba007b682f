//! Bounded retry with exponential backoff for channel sends.
//!
//! Each outbound channel call is retried a fixed number of times before the
//! channel is recorded as failed for that candidate; there is no unbounded
//! retry loop. Only transient failures are retried - a misconfigured or
//! rejecting provider fails immediately.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use domain::services::ChannelError;

/// Retry policy for outbound channel calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given attempt cap and base backoff.
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    /// Backoff before the given retry (attempt numbers start at 1; the
    /// first attempt has no delay). Doubles per attempt: base, 2x, 4x, ...
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.base_delay * 2u32.saturating_pow(attempt - 2)
        }
    }

    /// Whether an error is worth retrying.
    fn is_transient(err: &ChannelError) -> bool {
        matches!(err, ChannelError::Transport(_) | ChannelError::Timeout(_))
    }

    /// Run `op` until it succeeds, fails non-transiently, or the attempt
    /// cap is reached. Returns the last error on exhaustion.
    pub async fn run<T, F, Fut>(&self, label: &str, op: F) -> Result<T, ChannelError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ChannelError>>,
    {
        let mut attempt = 1;
        loop {
            let delay = self.delay_before(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if Self::is_transient(&err) && attempt < self.max_attempts => {
                    warn!(
                        target = label,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Channel send failed, retrying"
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::SendReceipt;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, 0)
    }

    #[test]
    fn test_backoff_schedule_doubles() {
        let policy = RetryPolicy::new(3, 500);
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(500));
        assert_eq!(policy.delay_before(3), Duration::from_millis(1000));
        assert_eq!(policy.delay_before(4), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in = Arc::clone(&calls);

        let result = fast_policy(3)
            .run("test", move || {
                let calls = Arc::clone(&calls_in);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(SendReceipt {
                        provider_id: "ok".to_string(),
                    })
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in = Arc::clone(&calls);

        let result = fast_policy(3)
            .run("test", move || {
                let calls = Arc::clone(&calls_in);
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(ChannelError::Transport("flaky".to_string()))
                    } else {
                        Ok(SendReceipt {
                            provider_id: "ok".to_string(),
                        })
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in = Arc::clone(&calls);

        let result: Result<SendReceipt, _> = fast_policy(3)
            .run("test", move || {
                let calls = Arc::clone(&calls_in);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ChannelError::Timeout(5))
                }
            })
            .await;

        assert!(matches!(result, Err(ChannelError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_fails_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in = Arc::clone(&calls);

        let result: Result<SendReceipt, _> = fast_policy(3)
            .run("test", move || {
                let calls = Arc::clone(&calls_in);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ChannelError::NotConfigured("no api key".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(ChannelError::NotConfigured(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
