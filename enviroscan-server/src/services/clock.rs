use std::time::Duration;

use enviroscan_api::TimeProvider;
use tokio::time::Instant;

/// Uptime measured on the tokio clock, so paused test runtimes control it.
#[derive(Debug, Clone, Copy)]
pub struct TokioTimeProvider {
    start: Instant,
}

impl TokioTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn instant_at(&self, uptime_ms: u64) -> Instant {
        self.start + Duration::from_millis(uptime_ms)
    }
}

impl TimeProvider for TokioTimeProvider {
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for TokioTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}
