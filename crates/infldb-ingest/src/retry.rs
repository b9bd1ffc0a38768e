//! Retry with exponential back-off and jitter for source fetches.
//!
//! Transient failures (network errors, HTTP 429, HTTP 5xx) are retried;
//! everything else propagates on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::IngestError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` if `err` is worth retrying after a back-off delay.
///
/// [`IngestError::NotFound`], 4xx statuses, file and CSV errors would fail
/// the same way again. [`IngestError::Cancelled`] is never produced inside a
/// fetch and is not retried either.
pub(crate) fn is_retriable(err: &IngestError) -> bool {
    match err {
        IngestError::Http(_) | IngestError::RateLimited { .. } => true,
        IngestError::UnexpectedStatus { status, .. } => *status >= 500,
        IngestError::NotFound { .. }
        | IngestError::Io { .. }
        | IngestError::Csv { .. }
        | IngestError::Cancelled => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// The delay before retry `n` is `backoff_base_ms × 2^(n-1)`, capped at 60 s,
/// then scaled by a random factor in `[0.75, 1.25)`. A `Retry-After` hint
/// from a 429 response raises the delay to at least that many seconds.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, IngestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IngestError>>,
{
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
                    IngestError::RateLimited {
                        retry_after_secs, ..
                    } => jittered.max(retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS)),
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient source error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
