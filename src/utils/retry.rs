// Retry with exponential backoff, used around LLM HTTP calls

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

pub async fn with_retry<F, Fut, T, E>(mut operation: F, max_retries: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                attempt += 1;
                if attempt >= max_retries {
                    return Err(error);
                }

                let delay = Duration::from_secs(2u64.pow(attempt.min(5)));
                warn!(error = %error, attempt, delay_secs = delay.as_secs(), "Retrying after error");
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err("transient".to_string())
                } else {
                    Ok(n)
                }
            },
            5,
        )
        .await;
        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let result: Result<(), String> =
            with_retry(|| async { Err("always".to_string()) }, 3).await;
        assert_eq!(result.unwrap_err(), "always");
    }
}
