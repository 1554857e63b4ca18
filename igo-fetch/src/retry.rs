use std::future::Future;
use std::time::Duration;

/// Fixed delay between retry attempts.
///
/// Spec.md §4.1: "No backoff is required; a fixed short delay is
/// acceptable." Grounded on `butterfly-dl`'s `retry_on_network_error`,
/// minus the exponential backoff it layers on top.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Retries `operation` indefinitely until it succeeds, logging a warning
/// between attempts. Both transient network errors and parse errors on a
/// bad fetch are retried the same way, per spec.md §4.1 and §7: a parse
/// error on one attempt does not distinguish itself from a network error
/// to the caller, it just means "try again."
pub async fn retry_forever<F, Fut, T, E>(label: &str, mut operation: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return value,
            Err(e) => {
                log::warn!("{label}: attempt {attempt} failed ({e}), retrying in {RETRY_DELAY:?}");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let attempts = AtomicU32::new(0);
        let result = retry_forever("test", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("not yet".to_string())
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
