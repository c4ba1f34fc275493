//! Retry with exponential back-off and jitter for the Finnhub client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 5xx, 429). Everything else is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FinnhubError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 5xx responses.
/// - [`FinnhubError::RateLimited`]: the free tier allows 60 calls/minute.
///
/// **Not retriable:**
/// - [`FinnhubError::Unauthorized`]: a bad key stays bad.
/// - [`FinnhubError::ApiError`], [`FinnhubError::Deserialize`],
///   [`FinnhubError::InvalidBaseUrl`], and 4xx statuses.
pub(crate) fn is_retriable(err: &FinnhubError) -> bool {
    match err {
        FinnhubError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        FinnhubError::UnexpectedStatus { status, .. } => *status >= 500,
        FinnhubError::RateLimited { .. } => true,
        FinnhubError::Unauthorized { .. }
        | FinnhubError::ApiError(_)
        | FinnhubError::Deserialize { .. }
        | FinnhubError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// A `RateLimited` error never waits less than the server's `Retry-After`.
/// Delay is capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FinnhubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FinnhubError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    FinnhubError::RateLimited { retry_after_secs } => jittered
                        .max(retry_after_secs.saturating_mul(1_000))
                        .min(MAX_DELAY_MS),
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Finnhub transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
