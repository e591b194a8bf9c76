//! Retry with exponential backoff for transient failures

use std::future::Future;
use std::time::Duration;
use taxzen_domain::ExternalServiceError;

/// Run `f` up to `max_attempts` times (at least once)
///
/// Only transient errors (`Unavailable`, `Timeout`) are retried; the delay
/// doubles after every failed attempt starting at `initial_backoff`.
pub(crate) async fn with_retry<F, Fut, T>(
    provider: &str,
    max_attempts: u32,
    initial_backoff: Duration,
    mut f: F,
) -> Result<T, ExternalServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExternalServiceError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut backoff = initial_backoff;
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() || attempt >= max_attempts => return Err(e),
            Err(e) => {
                tracing::warn!(
                    provider = provider,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "Completion request failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
        }
    }
}
