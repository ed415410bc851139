// src/retry/mod.rs
mod sleeper;
mod strategy;

pub use sleeper::{Sleeper, TokioSleeper};
pub use strategy::{RetryDecision, RetryStrategy, DEFAULT_RETRY_INTERVAL};
