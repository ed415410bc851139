// src/readiness/poller.rs
use super::reporter::{ConsoleReporter, Reporter};
use crate::check::{CheckError, ConnectionCheck};
use crate::retry::{RetryDecision, RetryStrategy, Sleeper, TokioSleeper};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Waiting,
    Ready,
    Failed,
}

/// Blocks until a database alias answers, retrying transient failures at a
/// fixed interval. Fatal errors end the poll unchanged.
pub struct ReadinessPoller<'a, S = TokioSleeper> {
    check: &'a dyn ConnectionCheck,
    reporter: &'a dyn Reporter,
    strategy: RetryStrategy<S>,
    state: PollState,
}

impl<'a> ReadinessPoller<'a, TokioSleeper> {
    pub fn new(check: &'a dyn ConnectionCheck, reporter: &'a dyn Reporter) -> Self {
        Self {
            check,
            reporter,
            strategy: RetryStrategy::default(),
            state: PollState::Waiting,
        }
    }
}

impl<'a, S: Sleeper> ReadinessPoller<'a, S> {
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> ReadinessPoller<'a, T> {
        ReadinessPoller {
            check: self.check,
            reporter: self.reporter,
            strategy: self.strategy.with_sleeper(sleeper),
            state: self.state,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub async fn run(&mut self, alias: &str) -> Result<(), CheckError> {
        let check = self.check;
        let reporter = self.reporter;

        self.state = PollState::Waiting;
        reporter.waiting(alias);
        info!("Waiting for database '{}'", alias);

        let result = self
            .strategy
            .execute_with_decision(
                || check.check(alias),
                |e: &CheckError| {
                    if e.is_transient() {
                        RetryDecision::Retry
                    } else {
                        RetryDecision::NoRetry
                    }
                },
                |attempt, e, retry_in| {
                    debug!(
                        "Database '{}' unavailable on attempt {}: {}",
                        alias, attempt, e
                    );
                    reporter.unavailable(alias, e, retry_in);
                },
            )
            .await;

        match result {
            Ok(()) => {
                self.state = PollState::Ready;
                info!("Database '{}' is available", alias);
                reporter.available(alias);
                Ok(())
            }
            Err(e) => {
                self.state = PollState::Failed;
                error!("Giving up on database '{}': {}", alias, e);
                Err(e)
            }
        }
    }
}

/// Poll `alias` until ready, printing progress to stdout.
pub async fn wait_for_database<S: Sleeper>(
    check: &dyn ConnectionCheck,
    sleeper: S,
    alias: &str,
) -> Result<(), CheckError> {
    let reporter = ConsoleReporter::stdout();
    ReadinessPoller::new(check, &reporter)
        .with_sleeper(sleeper)
        .run(alias)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::SilentReporter;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedCheck {
        script: Mutex<VecDeque<Result<(), CheckError>>>,
        aliases: Mutex<Vec<String>>,
    }

    impl ScriptedCheck {
        fn new(script: Vec<Result<(), CheckError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                aliases: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.aliases.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ConnectionCheck for ScriptedCheck {
        async fn check(&self, alias: &str) -> Result<(), CheckError> {
            self.aliases.lock().unwrap().push(alias.to_string());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("check called more often than scripted")
        }
    }

    #[derive(Default)]
    struct CountingSleeper {
        calls: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for CountingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.calls.lock().unwrap().push(duration);
        }
    }

    #[tokio::test]
    async fn test_ready_on_first_check() {
        let check = ScriptedCheck::new(vec![Ok(())]);
        let sleeper = CountingSleeper::default();
        let reporter = SilentReporter;

        let mut poller = ReadinessPoller::new(&check, &reporter).with_sleeper(&sleeper);
        poller.run("default").await.unwrap();

        assert_eq!(poller.state(), PollState::Ready);
        assert_eq!(check.calls(), 1);
        assert!(sleeper.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fatal_error_ends_poll() {
        let check = ScriptedCheck::new(vec![
            Err(CheckError::unreachable("default", "connection refused")),
            Err(CheckError::fatal("default", "password authentication failed")),
        ]);
        let sleeper = CountingSleeper::default();
        let reporter = SilentReporter;

        let mut poller = ReadinessPoller::new(&check, &reporter).with_sleeper(&sleeper);
        let err = poller.run("default").await.unwrap_err();

        assert!(matches!(err, CheckError::Fatal { .. }));
        assert_eq!(poller.state(), PollState::Failed);
        assert_eq!(check.calls(), 2);
        assert_eq!(sleeper.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_poller_starts_waiting() {
        let check = ScriptedCheck::new(vec![]);
        let reporter = SilentReporter;
        let poller = ReadinessPoller::new(&check, &reporter);

        assert_eq!(poller.state(), PollState::Waiting);
    }
}
