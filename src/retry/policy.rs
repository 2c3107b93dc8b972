//! Caller-side retries
//!
//! The dispatcher never retries on its own. Callers that want retries wrap a
//! call in a [`RetryExecutor`] with the [`RetryPolicy`] of their choice.

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::DeepgramError;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
    /// Maximum jitter as a fraction of the delay (0.0 to 1.0)
    pub jitter_factor: f64,
    /// Replaces [`DeepgramError::is_retryable`] when set
    pub retry_condition: Option<fn(&DeepgramError) -> bool>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            use_jitter: true,
            jitter_factor: 0.1,
            retry_condition: None,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub const fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub const fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    pub const fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn with_retry_condition(mut self, condition: fn(&DeepgramError) -> bool) -> Self {
        self.retry_condition = Some(condition);
        self
    }

    /// Cancellation always stops retrying, whatever the condition says.
    pub fn should_retry(&self, error: &DeepgramError) -> bool {
        if error.is_cancelled() {
            return false;
        }
        match self.retry_condition {
            Some(condition) => condition(error),
            None => error.is_retryable(),
        }
    }

    /// Delay before retry number `attempt` (zero based).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let base_delay =
            self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(base_delay as u64).min(self.max_delay);

        if self.use_jitter {
            self.add_jitter(delay)
        } else {
            delay
        }
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let jitter_range = delay.as_millis() as f64 * self.jitter_factor;
        if jitter_range <= 0.0 {
            return delay;
        }
        let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

/// Runs an operation until it succeeds, fails permanently or runs out of
/// attempts.
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, DeepgramError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, DeepgramError>>,
    {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    attempt += 1;
                    if attempt >= attempts || !self.policy.should_retry(&error) {
                        return Err(error);
                    }
                    let delay = self.policy.calculate_delay(attempt - 1);
                    tracing::debug!(target: "deepgram::http", attempt, delay_ms = delay.as_millis() as u64, err=%error, "retrying");
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Retry `operation` with [`RetryPolicy::default`].
pub async fn retry_with_default<F, Fut, T>(operation: F) -> Result<T, DeepgramError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, DeepgramError>>,
{
    RetryExecutor::new(RetryPolicy::default())
        .execute(operation)
        .await
}
