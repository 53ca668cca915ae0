//! Wall-clock stamping for request and run durations

use std::time::Duration;
use tokio::time::Instant;

/// Monotonic stopwatch
///
/// Backed by `tokio::time::Instant` so that tests running with a paused
/// clock observe exact virtual durations.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    /// Start timing now
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Time elapsed since start
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
