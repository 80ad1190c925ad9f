//! Retry with exponential backoff for feed requests.
//!
//! Transient failures (network errors, HTTP 429, HTTP 5xx) are retried;
//! everything else is returned to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Returns `true` if `err` is worth another attempt after a backoff delay.
///
/// Retriable:
/// - [`FeedError::Http`]: connection reset, timeout, DNS failure.
/// - [`FeedError::RateLimited`]: HTTP 429.
/// - [`FeedError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (4xx, malformed XML) fails immediately.
fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::Http(_) | FeedError::RateLimited { .. } => true,
        FeedError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        FeedError::Xml(_) => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries` times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds. With `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient feed error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
