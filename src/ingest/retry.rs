// src/ingest/retry.rs
use std::fmt::Display;
use std::future::Future;

/// Try each candidate in order and return the first success.
///
/// Attempts run strictly one after another; nothing after the first success
/// is started. Failures are logged and swallowed. `None` means every candidate failed
/// (or there were none).
pub async fn try_in_order<T, R, E, F, Fut>(
    candidates: impl IntoIterator<Item = T>,
    mut attempt: F,
) -> Option<R>
where
    T: Display,
    E: Display,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    for candidate in candidates {
        let label = candidate.to_string();
        match attempt(candidate).await {
            Ok(v) => {
                tracing::debug!(target: "ingest", candidate = %label, "attempt succeeded");
                return Some(v);
            }
            Err(e) => {
                tracing::warn!(target: "ingest", candidate = %label, error = %e, "attempt failed");
            }
        }
    }
    None
}
