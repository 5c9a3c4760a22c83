use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for connection attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,

    pub initial_delay_ms: u64,

    /// Upper bound for any single delay
    pub max_delay_ms: u64,

    pub backoff_multiplier: f64,

    /// Scale each delay to 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    /// 3 retries, 100ms initial delay, doubling up to 5s, with jitter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal (pre-jitter) delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1) as i32;
        let nominal = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        Duration::from_millis((nominal as u64).min(self.max_delay_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// The last error is returned when every attempt fails.
///
/// ```ignore
/// use database::common::{RetryConfig, retry_with_backoff};
///
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(|| connect_from_config(&config), policy).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        retries += 1;
        if retries > config.max_retries {
            warn!(attempts = retries, error = %error, "Giving up after repeated failures");
            return Err(error);
        }

        let mut delay = config.delay_for(retries);
        if config.use_jitter {
            delay = apply_jitter(delay);
        }

        warn!(
            attempt = retries,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Operation failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Scale a delay to a pseudo-random 50-100% of its value.
fn apply_jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = 50 + RandomState::new().hash_one(std::time::SystemTime::now()) % 51;
    delay * percent as u32 / 100
}

/// [`retry_with_backoff`] with the default policy.
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
