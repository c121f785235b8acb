use std::future::Future;

use tracing::{debug, warn};

use argus_error::ClassifiedError;

use crate::policy::{RetryDecision, RetryPolicy};

/// Drive an async operation under a retry policy.
///
/// The operation factory receives the 1-indexed attempt number (useful for
/// logging and idempotency keys). Between attempts the executor sleeps the
/// policy's deterministic backoff interval. The last error is returned
/// unchanged once the policy gives up, so the caller still sees the
/// original classification.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, ClassifiedError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ClassifiedError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => match policy.decide(&error, attempt) {
                RetryDecision::Retry { after } => {
                    debug!(
                        attempt,
                        kind = %error.kind(),
                        backoff_ms = after.as_millis() as u64,
                        "retrying after failure"
                    );
                    tokio::time::sleep(after).await;
                    attempt += 1;
                }
                RetryDecision::GiveUp { reason } => {
                    warn!(attempt, kind = %error.kind(), %reason, "giving up");
                    return Err(error);
                }
            },
        }
    }
}
