use std::future::Future;
use std::time::Duration;

/// Timeout and retry bounds applied to every outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Deadline for a single attempt
    pub timeout: Duration,
    /// Extra attempts after the first one fails
    pub retries: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Runs `attempt` until it succeeds or the policy is exhausted. The error of
/// the last attempt is returned.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> eyre::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = eyre::Result<T>>,
{
    let mut tries = 0;
    loop {
        tries += 1;

        let err = match tokio::time::timeout(policy.timeout, attempt()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err,
            Err(_) => eyre::eyre!("{} timed out after {:?}", operation, policy.timeout),
        };

        if tries > policy.retries {
            return Err(err);
        }

        tracing::warn!("{} failed (attempt {}): {:#}, retrying", operation, tries, err);
        tokio::time::sleep(policy.backoff).await;
    }
}
