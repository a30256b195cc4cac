//! Artificial latency for mock-backed actions
//!
//! Every action awaits this before touching its collection so clients see
//! realistic response times against the in-memory repositories.

use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencySimulator {
    delay: Duration,
}

impl LatencySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// No delay, used by tests and the CLI
    pub fn none() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }

        trace!(delay_ms = self.delay.as_millis() as u64, "Simulating latency");
        tokio::time::sleep(self.delay).await;
    }
}
