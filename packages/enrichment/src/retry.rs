//! Bounded retry with a fixed delay between attempts.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{EnrichmentError, Result};

/// How often and how patiently a failing call is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never less than one.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(20, Duration::from_secs(1))
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. Every failure is retried; the
/// last one is reported inside [`EnrichmentError::RetriesExhausted`].
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_error: Option<EnrichmentError> = None;

    for attempt in 1..=attempts {
        if attempt > 1 {
            debug!(label, attempt, "retrying after {:?}", policy.delay);
            tokio::time::sleep(policy.delay).await;
        }

        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(label, attempt, max_attempts = attempts, error = %e, "call failed");
                last_error = Some(e);
            }
        }
    }

    Err(EnrichmentError::RetriesExhausted {
        label: label.to_string(),
        attempts,
        message: last_error.map(|e| e.to_string()).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_first_success_is_returned() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&quick(5), "test", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, EnrichmentError>(42) }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let result = with_retry(&quick(5), "test", |attempt| async move {
            if attempt < 3 {
                Err(EnrichmentError::EmptyResponse)
            } else {
                Ok(attempt)
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts_and_last_error() {
        let calls = AtomicU32::new(0);
        let err = with_retry(&quick(4), "spellcheck", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(EnrichmentError::EmptyResponse) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match err {
            EnrichmentError::RetriesExhausted {
                label,
                attempts,
                message,
            } => {
                assert_eq!(label, "spellcheck");
                assert_eq!(attempts, 4);
                assert!(message.contains("empty response"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_between_attempts() {
        let start = tokio::time::Instant::now();
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let _ = with_retry(&policy, "test", |_| async {
            Err::<(), _>(EnrichmentError::EmptyResponse)
        })
        .await;

        // Two pauses between three attempts
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }

    #[test]
    fn test_policy_never_below_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
        assert_eq!(RetryPolicy::default().max_attempts, 20);
    }
}
