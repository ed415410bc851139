// src/retry/strategy.rs

use super::sleeper::{Sleeper, TokioSleeper};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Pause between two failed readiness checks.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed-interval retry loop with no attempt cap. The caller bounds total
/// wait time, e.g. through an orchestrator timeout.
#[derive(Debug, Clone)]
pub struct RetryStrategy<S = TokioSleeper> {
    interval: Duration,
    sleeper: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    NoRetry,
}

impl RetryStrategy<TokioSleeper> {
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            sleeper: TokioSleeper,
        }
    }
}

impl Default for RetryStrategy<TokioSleeper> {
    fn default() -> Self {
        Self::fixed(DEFAULT_RETRY_INTERVAL)
    }
}

impl<S: Sleeper> RetryStrategy<S> {
    /// Swap the delay mechanism, keeping the interval.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> RetryStrategy<T> {
        RetryStrategy {
            interval: self.interval,
            sleeper,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `f` until it succeeds or fails with an error `should_retry`
    /// rejects. `on_retry` sees every retried failure before the sleep.
    pub async fn execute_with_decision<F, Fut, T, E>(
        &self,
        mut f: F,
        should_retry: impl Fn(&E) -> RetryDecision,
        mut on_retry: impl FnMut(u32, &E, Duration),
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);

            match f().await {
                Ok(result) => return Ok(result),
                Err(error) => match should_retry(&error) {
                    RetryDecision::NoRetry => {
                        debug!("Attempt {} failed with non-retryable error: {}", attempt, error);
                        return Err(error);
                    }
                    RetryDecision::Retry => {
                        debug!(
                            "Attempt {} failed: {}. Retrying in {:?}",
                            attempt, error, self.interval
                        );
                        on_retry(attempt, &error, self.interval);
                        self.sleeper.sleep(self.interval).await;
                    }
                },
            }
        }
    }
}
