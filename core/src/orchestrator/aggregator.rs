//! Outcome aggregation
//!
//! The aggregator is the single writer of the run counters. Workers only
//! send outcomes; every increment happens here, on one task, so no locking
//! is needed.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::clock::Stopwatch;
use crate::outcome::Outcome;

/// Counters accumulated over a run
///
/// Returned by value from [`Aggregator::collect`] once the run is over,
/// at which point they are frozen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunCounters {
    /// Outcomes received (completed + failed)
    pub requests_attempted: usize,

    /// Outcomes without an error
    pub requests_completed: usize,

    /// Body bytes of completed requests
    pub total_bytes_transferred: u64,

    /// Sum of the durations of completed requests
    pub total_request_duration: Duration,

    /// Wall-clock time from run start to the last outcome
    pub run_elapsed: Duration,

    /// Outcomes per status code (0 for transport errors)
    pub status_counts: BTreeMap<u16, usize>,
}

impl RunCounters {
    /// Attempted minus completed
    pub fn failed_requests(&self) -> usize {
        self.requests_attempted - self.requests_completed
    }

    fn record(&mut self, outcome: &Outcome) {
        self.requests_attempted += 1;
        *self.status_counts.entry(outcome.status_code).or_insert(0) += 1;

        if outcome.is_success() {
            self.requests_completed += 1;
            self.total_bytes_transferred += outcome.body_bytes;
            self.total_request_duration += outcome.duration;
        }
    }
}

/// Single-consumer outcome collector
///
/// The run clock starts when the aggregator is created, so create it right
/// before starting the dispatcher.
#[derive(Debug)]
pub struct Aggregator {
    expected: usize,
    clock: Stopwatch,
    observer: Option<mpsc::UnboundedSender<Outcome>>,
}

impl Aggregator {
    /// Expect `expected` outcomes; starts the run clock
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            clock: Stopwatch::start(),
            observer: None,
        }
    }

    /// Forward every outcome to `observer` after counting it
    ///
    /// Unbounded so that a slow observer never holds back aggregation.
    pub fn with_observer(mut self, observer: mpsc::UnboundedSender<Outcome>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Drain `results` until exactly `expected` outcomes have been counted
    ///
    /// Returns early only if the channel closes first, which means every
    /// worker has exited (a time-limited run, or a crashed worker). Never
    /// reads past the expected count. The observer is dropped on return,
    /// which closes its stream.
    pub async fn collect(mut self, results: &mut mpsc::Receiver<Outcome>) -> RunCounters {
        let mut counters = RunCounters::default();

        while counters.requests_attempted < self.expected {
            let Some(outcome) = results.recv().await else {
                tracing::info!(
                    received = counters.requests_attempted,
                    expected = self.expected,
                    "Results channel closed before the expected count"
                );
                break;
            };

            counters.record(&outcome);

            if let Some(observer) = &self.observer {
                if observer.send(outcome).is_err() {
                    tracing::debug!("Outcome observer went away");
                    self.observer = None;
                }
            }
        }

        counters.run_elapsed = self.clock.elapsed();

        tracing::debug!(
            attempted = counters.requests_attempted,
            completed = counters.requests_completed,
            failed = counters.failed_requests(),
            elapsed_secs = counters.run_elapsed.as_secs_f64(),
            "Counters frozen"
        );

        counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(seq: u64, bytes: u64, millis: u64) -> Outcome {
        Outcome::success(seq, 0, 200, bytes, Duration::from_millis(millis))
    }

    fn failed(seq: u64) -> Outcome {
        Outcome::failure(seq, 0, 0, 0, Duration::from_millis(30), "refused")
    }

    #[test]
    fn test_counters_default() {
        let counters = RunCounters::default();
        assert_eq!(counters.requests_attempted, 0);
        assert_eq!(counters.failed_requests(), 0);
        assert!(counters.status_counts.is_empty());
    }

    #[test]
    fn test_failures_do_not_add_bytes_or_duration() {
        let mut counters = RunCounters::default();
        counters.record(&ok(0, 100, 10));
        counters.record(&failed(1));
        counters.record(&Outcome::failure(
            2,
            0,
            500,
            64,
            Duration::from_millis(5),
            "non-success status 500",
        ));

        assert_eq!(counters.requests_attempted, 3);
        assert_eq!(counters.requests_completed, 1);
        assert_eq!(counters.failed_requests(), 2);
        assert_eq!(counters.total_bytes_transferred, 100);
        assert_eq!(counters.total_request_duration, Duration::from_millis(10));
        assert_eq!(counters.status_counts.get(&200), Some(&1));
        assert_eq!(counters.status_counts.get(&0), Some(&1));
        assert_eq!(counters.status_counts.get(&500), Some(&1));
    }

    #[tokio::test]
    async fn test_collect_stops_at_expected_count() {
        let (tx, mut rx) = mpsc::channel(16);
        for seq in 0..7 {
            tx.send(ok(seq, 10, 1)).await.unwrap();
        }

        let counters = Aggregator::new(5).collect(&mut rx).await;
        assert_eq!(counters.requests_attempted, 5);

        // The surplus is left untouched
        assert_eq!(rx.recv().await.map(|o| o.seq), Some(5));
        assert_eq!(rx.recv().await.map(|o| o.seq), Some(6));
    }

    #[tokio::test]
    async fn test_collect_returns_when_channel_closes_early() {
        let (tx, mut rx) = mpsc::channel(16);
        tx.send(ok(0, 10, 1)).await.unwrap();
        tx.send(failed(1)).await.unwrap();
        drop(tx);

        let counters = Aggregator::new(10).collect(&mut rx).await;
        assert_eq!(counters.requests_attempted, 2);
        assert_eq!(counters.requests_completed, 1);
    }

    #[tokio::test]
    async fn test_collect_forwards_to_observer() {
        let (tx, mut rx) = mpsc::channel(16);
        let (observer_tx, mut observer_rx) = mpsc::unbounded_channel();
        for seq in 0..3 {
            tx.send(ok(seq, 1, 1)).await.unwrap();
        }

        let counters = Aggregator::new(3)
            .with_observer(observer_tx)
            .collect(&mut rx)
            .await;
        assert_eq!(counters.requests_attempted, 3);

        let mut seen = Vec::new();
        while let Some(outcome) = observer_rx.recv().await {
            seen.push(outcome.seq);
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_collect_survives_dropped_observer() {
        let (tx, mut rx) = mpsc::channel(16);
        let (observer_tx, observer_rx) = mpsc::unbounded_channel();
        drop(observer_rx);
        for seq in 0..4 {
            tx.send(ok(seq, 1, 1)).await.unwrap();
        }

        let counters = Aggregator::new(4)
            .with_observer(observer_tx)
            .collect(&mut rx)
            .await;
        assert_eq!(counters.requests_attempted, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_stamps_run_elapsed() {
        let (tx, mut rx) = mpsc::channel(4);
        let aggregator = Aggregator::new(1);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(750)).await;
            tx.send(ok(0, 1, 750)).await.unwrap();
        });

        let counters = aggregator.collect(&mut rx).await;
        assert_eq!(counters.run_elapsed, Duration::from_millis(750));
    }
}
