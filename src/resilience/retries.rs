//! Retry logic for upstream calls.
//!
//! # Responsibilities
//! - Decide which outcomes are transient (429, transport failure)
//! - Re-issue the call with exponential backoff, strictly sequentially
//! - Collapse exhaustion into a single error
//!
//! # Design Decisions
//! - Any other status, 4xx or 5xx, is returned to the caller untouched
//! - Every transient failure is followed by its backoff, the last one
//!   included, before exhaustion is reported

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::RetryConfig;
use crate::resilience::backoff::backoff_delay;

/// Anything that carries an HTTP status.
pub trait HasStatus {
    fn status(&self) -> StatusCode;
}

impl HasStatus for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }
}

/// Attempt bound and backoff base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

/// Terminal failure of a retried call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("API request failed after multiple retries.")]
    RetriesExhausted { attempts: u32 },
}

/// Whether an outcome should be retried.
///
/// `status` is `None` when the call never produced a response.
pub fn is_retryable(status: Option<StatusCode>, network_error: bool) -> bool {
    if network_error {
        return true;
    }
    status == Some(StatusCode::TOO_MANY_REQUESTS)
}

/// Call `send` until it yields a non-429 response or the policy runs out.
///
/// Errors from `send` are treated as transport failures. Their `Display`
/// output is logged, so it must not carry secrets.
pub async fn send_with_retry<F, Fut, R, E>(policy: &RetryPolicy, mut send: F) -> Result<R, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    R: HasStatus,
    E: Display,
{
    for attempt in 0..policy.max_attempts {
        match send().await {
            Ok(response) => {
                let status = response.status();
                if !is_retryable(Some(status), false) {
                    return Ok(response);
                }
                tracing::info!(attempt, status = %status, "Upstream rate limited");
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Upstream transport error");
            }
        }

        let delay = backoff_delay(attempt, policy.base_delay);
        tracing::info!(attempt, delay = ?delay, "Backing off before next upstream attempt");
        tokio::time::sleep(delay).await;
    }

    Err(FetchError::RetriesExhausted {
        attempts: policy.max_attempts,
    })
}
