use core_config::{ConfigError, FromEnv, env_parse};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

/// How long startup keeps waiting for PostgreSQL.
///
/// - `DB_CONNECT_RETRIES`: defaults to 5
/// - `DB_RETRY_BASE_DELAY_MS`: defaults to 200, doubled per retry up to 5s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }

    /// Delay before retry `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(200))
    }
}

impl FromEnv for RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_retries = env_parse("DB_CONNECT_RETRIES", 5u32)?;
        let base_delay_ms = env_parse("DB_RETRY_BASE_DELAY_MS", 200u64)?;
        Ok(Self::new(max_retries, Duration::from_millis(base_delay_ms)))
    }
}

/// Run `operation` until it succeeds, fails with an error `is_transient`
/// rejects, or `config.max_retries` is used up. The last error is returned.
pub async fn retry_while<F, Fut, T, E>(
    mut operation: F,
    config: &RetryConfig,
    is_transient: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        attempt += 1;
        if !is_transient(&err) {
            warn!(error = %err, "Permanent storage error, not retrying");
            return Err(err);
        }
        if attempt > config.max_retries {
            warn!(attempts = attempt, error = %err, "Storage still unreachable, giving up");
            return Err(err);
        }

        let delay = config.delay_for(attempt);
        info!(
            attempt,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Storage unreachable, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig::new(max_retries, Duration::from_millis(1))
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let config = RetryConfig {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };
        assert_eq!(config.delay_for(1), Duration::from_millis(100));
        assert_eq!(config.delay_for(2), Duration::from_millis(200));
        assert_eq!(config.delay_for(3), Duration::from_millis(350));
        assert_eq!(config.delay_for(40), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = retry_while(
            || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("connection refused")
                    } else {
                        Ok("connected")
                    }
                }
            },
            &fast(5),
            |_| true,
        )
        .await;

        assert_eq!(result, Ok("connected"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = retry_while(
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("password authentication failed")
                }
            },
            &fast(5),
            |e: &&str| e.contains("refused"),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = retry_while(
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("connection refused")
                }
            },
            &fast(2),
            |_| true,
        )
        .await;

        assert_eq!(result, Err("connection refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("DB_CONNECT_RETRIES", Some("12")),
                ("DB_RETRY_BASE_DELAY_MS", Some("50")),
            ],
            || {
                let config = RetryConfig::from_env().unwrap();
                assert_eq!(config.max_retries, 12);
                assert_eq!(config.base_delay, Duration::from_millis(50));
            },
        );
    }
}
