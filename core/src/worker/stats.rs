//! Worker statistics tracking

use std::time::Duration;
use tokio::time::Instant;

use crate::outcome::Outcome;

/// Statistics tracked locally by each worker
///
/// These are task-local and only used for logging when the pool drains;
/// run totals come from the aggregator.
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    /// Number of successful requests
    pub completed: usize,

    /// Number of failed requests
    pub failed: usize,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Jobs handled (completed + failed)
    pub fn total_requests(&self) -> usize {
        self.completed + self.failed
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            self.completed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Merge stats from another worker
    pub fn merge(&mut self, other: &WorkerStats) {
        self.completed += other.completed;
        self.failed += other.failed;
    }
}
