//! Tick pacing for the polling loop
//!
//! The loop never sleeps directly; it asks a [`Sleeper`], so tests can run
//! many cycles back to back and count the requested delays.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, period: Duration);
}

/// Real wall-clock delay
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}
