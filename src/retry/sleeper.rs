// src/retry/sleeper.rs
use async_trait::async_trait;
use std::time::Duration;

/// Delay between attempts. Injected so tests never block on a real clock.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<'a, S: Sleeper + ?Sized> Sleeper for &'a S {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
