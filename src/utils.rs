use serde_json::Value;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::retry::RetryConfig;

/// Runs `operation` up to `config.max_attempts` times, sleeping
/// `min(initial_delay * 2^(attempt-1), max_delay)` between attempts.
/// The error from the last attempt is returned as-is.
pub async fn retry_with_backoff<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay_ms = config.initial_delay_ms;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        attempt,
                        max_attempts = config.max_attempts,
                        "Retry succeeded"
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt >= config.max_attempts {
                    warn!(
                        max_attempts = config.max_attempts,
                        error = %e,
                        "Retry failed after exhausting all attempts"
                    );
                    return Err(e);
                }

                let capped_delay_ms = std::cmp::min(delay_ms, config.max_delay_ms);

                warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = capped_delay_ms,
                    error = %e,
                    "Attempt failed, backing off"
                );

                sleep(Duration::from_millis(capped_delay_ms)).await;

                delay_ms = delay_ms.saturating_mul(2);
            }
        }
    }
}

/// Short identifier correlating one inbound request across log lines and the
/// response body.
pub fn short_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Returns the first present, non-null value among `paths`, each path being a
/// chain of object keys probed in order.
pub fn probe<'a>(record: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|path| {
        let mut current = record;
        for key in *path {
            current = current.get(key)?;
        }
        if current.is_null() { None } else { Some(current) }
    })
}

/// Like [`probe`], rendered for display: strings pass through, numbers and
/// booleans are stringified, anything else counts as absent.
pub fn probe_display(record: &Value, paths: &[&[&str]]) -> Option<String> {
    match probe(record, paths)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String-valued probe, for fields where a non-string match should be skipped
/// rather than stringified.
pub fn probe_string(record: &Value, paths: &[&[&str]]) -> Option<String> {
    probe(record, paths)
        .and_then(Value::as_str)
        .map(str::to_string)
}
