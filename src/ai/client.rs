//! Retry controller for the assistant request path.
//!
//! Drives a [`GenerativeBackend`] to a terminal outcome: transient failures
//! (overload, rate limit, network) back off on a fixed schedule and try
//! again; everything else surfaces immediately. Retries are strictly
//! sequential and bounded by the schedule length.

use std::time::Duration;

use super::GenerativeBackend;
use super::composer::GenerateContentRequest;
use super::error::AssistantError;

/// Backoff schedule for one logical send. The default mirrors production:
/// three retries at 1s, 2s and 4s. Tests inject millisecond schedules.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Number of retries after the initial attempt.
    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }

    /// Total attempts including the first one.
    pub fn total_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    fn delay_for(&self, attempt: usize) -> Duration {
        self.delays[attempt]
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ],
        }
    }
}

/// Observer payload emitted before each backoff wait, so the caller can
/// surface retry progress (e.g. "tentando novamente... (2/4)").
#[derive(Debug, Clone)]
pub struct RetryNotice {
    /// The transient failure that triggered this retry.
    pub error: AssistantError,
    /// 1-based number of the attempt about to run (2..=total_attempts).
    pub upcoming_attempt: usize,
    pub total_attempts: usize,
    pub delay: Duration,
}

/// Assistant client: a backend plus the retry policy that wraps it.
pub struct AssistantClient<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: GenerativeBackend> AssistantClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run one request to a terminal outcome. `on_retry` fires once per
    /// backoff wait, never for the terminal attempt.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
        mut on_retry: impl FnMut(&RetryNotice),
    ) -> Result<String, AssistantError> {
        let total_attempts = self.policy.total_attempts();
        let mut attempt = 0;

        loop {
            match self.backend.generate(request).await {
                Ok(text) => {
                    tracing::debug!(attempt = attempt + 1, "assistant reply received");
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && attempt < self.policy.max_retries() => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        total_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, backing off"
                    );
                    let notice = RetryNotice {
                        error: err,
                        upcoming_attempt: attempt + 2,
                        total_attempts,
                        delay,
                    };
                    on_retry(&notice);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempt = attempt + 1, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }
}
