//! Transport retry policy for recognition requests.
//!
//! Exponential backoff: the n-th retry waits `initial_delay * 2^(n-1)`,
//! never longer than `max_delay`. Only the configured HTTP statuses and
//! connection-level failures (timeouts, refused connections) are retried.
//! Once attempts run out the last response or error is handed back.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::warn;

use super::domain::RecognitionError;

/// Retry policy applied to every HTTP request the recognizer sends.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first (at least 1)
    pub attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Cap for any single delay
    pub max_delay: Duration,
    /// HTTP status codes worth retrying
    pub statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        crate::config::RetryConfig::default().to_policy()
    }
}

impl RetryPolicy {
    /// A policy that sends each request exactly once.
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            attempts: 1,
            ..Default::default()
        }
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(62) as i32;
        let secs = self.initial_delay.as_secs_f64() * 2f64.powi(exponent);
        let capped = secs.min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }

    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status.as_u16())
    }

    /// Sends `request`, retrying according to the policy.
    ///
    /// The returned response may still carry a non-success status when the
    /// status is not retryable or attempts are exhausted; callers decide
    /// what that means.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, RecognitionError> {
        let attempts = self.attempts.max(1);
        let mut attempt = 1u32;

        loop {
            let Some(current) = request.try_clone() else {
                return Err(RecognitionError::Network(
                    "request body cannot be replayed".to_string(),
                ));
            };

            match current.send().await {
                Ok(response) if attempt < attempts && self.is_retryable_status(response.status()) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        status = %response.status(),
                        attempt,
                        ?delay,
                        "Retryable response, backing off"
                    );
                    drop(response);
                    tokio::time::sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(e) if attempt < attempts && is_transient(&e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        ?delay,
                        "Transient network error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(RecognitionError::Network(e.to_string())),
            }

            attempt += 1;
        }
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}
