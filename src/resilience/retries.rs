//! Retry loop for outbound notification sends.

use std::future::Future;

use crate::notify::NotifyError;
use crate::resilience::backoff::BackoffPolicy;

/// Run `op` until it succeeds, fails permanently, or the attempt budget runs out.
///
/// Returns the last error on failure.
pub async fn retry_with_backoff<F, Fut>(
    policy: &BackoffPolicy,
    label: &str,
    mut op: F,
) -> Result<(), NotifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), NotifyError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let delay = policy.delay(attempt);
                tracing::info!(channel = label, attempt, delay = ?delay, error = %e, "Retrying notification");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast(max_attempts: u32) -> BackoffPolicy {
        BackoffPolicy {
            max_attempts,
            base: Duration::from_millis(1),
            max: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(&fast(3), "email", move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(NotifyError::Unavailable("down".into()))
            } else {
                Ok(())
            }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(&fast(2), "sms", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::Unavailable("down".into()))
        })
        .await;
        assert!(matches!(result, Err(NotifyError::Unavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(&fast(5), "sms", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(NotifyError::Rejected("bad number".into()))
        })
        .await;
        assert!(matches!(result, Err(NotifyError::Rejected(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
