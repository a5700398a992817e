//! Retry with exponential back-off and jitter for store requests.
//!
//! Product upserts are idempotent on `(tenant_id, code)`, so resending a batch
//! after a transient failure cannot create duplicates. Client errors (4xx) and
//! malformed responses are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused or reset.
/// - HTTP 5xx and 429 responses.
///
/// **Not retriable:**
/// - Other [`StoreError::Api`] statuses: the request itself is rejected.
/// - [`StoreError::Deserialize`]: the response shape will not change.
/// - [`StoreError::InvalidBaseUrl`]: configuration problem.
pub(crate) fn is_retriable(err: &StoreError) -> bool {
    match err {
        StoreError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        StoreError::Api { status, .. } => *status >= 500 || *status == 429,
        StoreError::Deserialize { .. } | StoreError::InvalidBaseUrl { .. } => false,
    }
}

/// Upper bound for a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Sleep before retry number `retry` (1-based): `base × 2^(retry-1)`, capped
/// at [`MAX_DELAY_MS`], then scaled by a random factor in `[0.75, 1.25)`.
fn backoff_delay(retry: u32, backoff_base_ms: u64) -> Duration {
    let exponential = backoff_base_ms.saturating_mul(1u64 << retry.saturating_sub(1).min(10));
    let capped = exponential.min(MAX_DELAY_MS);
    let jitter = 0.75 + rand::random::<f64>() * 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let millis = (capped as f64 * jitter) as u64;
    Duration::from_millis(millis)
}

/// Runs `request`, resending it up to `max_retries` times while it fails with
/// a transient error.
///
/// With `backoff_base_ms = 500` the sleeps are roughly 0.5 s, 1 s, 2 s, ...
/// (±25 %), never more than 30 s each. The last error is returned once the
/// retries are spent; non-transient errors are returned at once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut request: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match request().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries >= max_retries || !is_retriable(&err) {
            return Err(err);
        }
        retries += 1;
        let delay = backoff_delay(retries, backoff_base_ms);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "store request failed, resending after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}
