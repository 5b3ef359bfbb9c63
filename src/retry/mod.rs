//! Retry Mechanism Module
//!
//! Bounded retries with exponential backoff for provider API calls.
//!
//! The executor distinguishes two failure channels. An operation that returns
//! `Err` is retried until attempts run out. An operation that *returns* a
//! response-like value is inspected through [`RetryOutcome`]: client-error
//! responses (HTTP 400-499) are handed back immediately since a bad key or an
//! exhausted quota will not self-heal, while 5xx responses are retried like
//! thrown errors.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::warn;

use crate::error::AiError;

/// How the retry executor should treat a successfully returned value.
///
/// Implemented by response-like types whose failure mode is carried as data
/// rather than as an `Err`.
pub trait RetryOutcome {
    /// A 4xx-class outcome: return it as-is, never retry.
    fn is_client_error(&self) -> bool {
        false
    }

    /// A 5xx-class outcome: worth another attempt.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt
    pub retries: u32,
    /// Delay before the first retry
    pub delay: Duration,
    /// Backoff multiplier applied per attempt
    pub backoff: f64,
    /// Whether to add jitter to delays
    pub use_jitter: bool,
    /// Maximum jitter percentage (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: crate::defaults::retry::MAX_RETRIES,
            delay: crate::defaults::retry::INITIAL_DELAY,
            backoff: crate::defaults::retry::BACKOFF_MULTIPLIER,
            use_jitter: false,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retries after the initial attempt
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the base delay between attempts
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub const fn with_backoff(mut self, backoff: f64) -> Self {
        self.backoff = backoff;
        self
    }

    /// Enable or disable jitter
    pub const fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Total number of attempts including the initial one
    pub const fn max_attempts(&self) -> u32 {
        self.retries + 1
    }

    /// Calculate the wait before the retry following `attempt` (zero-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.delay.as_millis() as f64 * self.backoff.powi(attempt as i32);
        let delay = Duration::from_millis(base as u64);

        if self.use_jitter {
            self.add_jitter(delay)
        } else {
            delay
        }
    }

    fn add_jitter(&self, delay: Duration) -> Duration {
        let mut rng = rand::thread_rng();
        let jitter_range = delay.as_millis() as f64 * self.jitter_factor;
        let jitter = rng.gen_range(-jitter_range..=jitter_range);

        let with_jitter = delay.as_millis() as f64 + jitter;
        Duration::from_millis(with_jitter.max(0.0) as u64)
    }
}

/// Retry executor that drives the attempt loop
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Access the configured policy
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute an operation with retry logic.
    ///
    /// Attempts are strictly sequential. After exhausting retries the last
    /// error (or last retryable value) is surfaced unchanged.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, AiError>>,
        T: RetryOutcome,
    {
        let mut last_error: Option<AiError> = None;
        let mut last_value: Option<T> = None;

        for attempt in 0..self.policy.max_attempts() {
            match operation().await {
                Ok(value) => {
                    if value.is_client_error() || !value.is_retryable() {
                        return Ok(value);
                    }
                    last_error = None;
                    last_value = Some(value);
                    if attempt < self.policy.retries {
                        let wait = self.policy.delay_for(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = self.policy.max_attempts(),
                            wait_ms = wait.as_millis() as u64,
                            "retryable response, retrying"
                        );
                        sleep(wait).await;
                    }
                }
                Err(error) => {
                    if attempt < self.policy.retries {
                        let wait = self.policy.delay_for(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = self.policy.max_attempts(),
                            wait_ms = wait.as_millis() as u64,
                            error = %error,
                            "attempt failed, retrying"
                        );
                        sleep(wait).await;
                    }
                    last_value = None;
                    last_error = Some(error);
                }
            }
        }

        if let Some(value) = last_value {
            return Ok(value);
        }

        Err(last_error
            .unwrap_or_else(|| AiError::InternalError("retry executor finished without a result".to_string())))
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

/// Convenience function to retry an operation with the default policy
pub async fn with_retry<F, Fut, T>(operation: F) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AiError>>,
    T: RetryOutcome,
{
    RetryExecutor::default().execute(operation).await
}
