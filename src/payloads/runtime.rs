use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tokio::time::sleep;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub timeout_secs: Option<u64>,
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            retries: 0,
            retry_delay_ms: 500,
        }
    }
}

/// POSTs `payload` as JSON with bearer auth, retrying transient failures.
pub(crate) async fn send_with_retry<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    payload: &T,
    config: RetryConfig,
) -> Result<reqwest::Response> {
    let max_attempts = config.retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        let mut request = client.post(url).bearer_auth(api_key).json(payload);

        if let Some(timeout_secs) = config.timeout_secs {
            request = request.timeout(Duration::from_secs(timeout_secs));
        }

        match request.send().await {
            Ok(response) => {
                if response.status().is_success() {
                    return Ok(response);
                }

                let status = response.status();
                let body = response.text().await.unwrap_or_default();

                if is_retryable_status(status) && attempt + 1 < max_attempts {
                    let delay = retry_delay(attempt, config.retry_delay_ms);
                    warn!(
                        %status,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after API error"
                    );
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                return Err(Error::Api { status, body });
            }
            Err(source) => {
                if is_retryable_request_error(&source) && attempt + 1 < max_attempts {
                    let delay = retry_delay(attempt, config.retry_delay_ms);
                    warn!(
                        error = %source,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transport error"
                    );
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                return Err(Error::Request(source));
            }
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_request_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

fn retry_delay(attempt: u32, base_ms: u64) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    let delay_ms = base_ms.saturating_mul(factor).min(30_000);
    Duration::from_millis(delay_ms)
}
