//! Dispatcher: job queue, worker pool, and job feeding

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::channel::ChannelConfig;
use crate::config::RequestSpec;
use crate::error::{BenchError, BenchResult};
use crate::job::Job;
use crate::outcome::Outcome;
use crate::traits::HttpClient;
use crate::worker::{WorkerBuilder, WorkerStats};

/// Starts the worker pool and feeds it jobs
///
/// The dispatcher owns the write side of the job queue: it is the only
/// sender and closes the queue exactly once, after the last job.
pub struct Dispatcher {
    /// Run description (shared with every job)
    spec: Arc<RequestSpec>,

    /// HTTP client (shared across workers)
    client: Arc<dyn HttpClient>,

    /// Results channel sizing
    channel_config: ChannelConfig,
}

impl Dispatcher {
    /// Create a dispatcher for an already validated spec
    pub fn new(
        spec: Arc<RequestSpec>,
        client: Arc<dyn HttpClient>,
        channel_config: ChannelConfig,
    ) -> Self {
        Self {
            spec,
            client,
            channel_config,
        }
    }

    /// Start the run
    ///
    /// Spawns `concurrency` workers on a job queue of capacity
    /// `concurrency`, then a feeder task that pushes `total_requests` jobs
    /// (fewer if a time limit expires first) and closes the queue. Returns
    /// immediately with the results receiver; no results sender is kept
    /// here, so the receiver closes once the last worker exits.
    pub fn start(&self) -> BenchResult<(Dispatch, mpsc::Receiver<Outcome>)> {
        let concurrency = self.spec.concurrency;
        let (jobs_tx, jobs_rx) = async_channel::bounded(concurrency.max(1));
        let (results_tx, results_rx) = mpsc::channel(self.channel_config.results_buffer());

        tracing::info!(
            target_url = %self.spec.target_url,
            total_requests = self.spec.total_requests,
            concurrency,
            timeout = ?self.spec.timeout(),
            time_limit = ?self.spec.time_limit(),
            "Starting benchmark"
        );

        let mut workers = Vec::with_capacity(concurrency);
        for worker_id in 0..concurrency {
            let worker = WorkerBuilder::new(worker_id)
                .client(Arc::clone(&self.client))
                .jobs(jobs_rx.clone())
                .results(results_tx.clone())
                .build()?;

            workers.push(tokio::spawn(worker.run()));
        }
        drop(jobs_rx);
        drop(results_tx);

        // A limit too far out to represent is no limit at all
        let deadline = self
            .spec
            .time_limit()
            .and_then(|limit| Instant::now().checked_add(limit));
        let feeder = tokio::spawn(feed(jobs_tx, Arc::clone(&self.spec), deadline));

        Ok((Dispatch { feeder, workers }, results_rx))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("spec", &self.spec)
            .field("client", &self.client.name())
            .field("channel_config", &self.channel_config)
            .finish()
    }
}

/// Push job tokens into the queue, then close it
///
/// Returns the number of jobs actually handed to the queue.
async fn feed(
    jobs: async_channel::Sender<Job>,
    spec: Arc<RequestSpec>,
    deadline: Option<Instant>,
) -> usize {
    let mut dispatched = 0;

    for seq in 0..spec.total_requests as u64 {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            tracing::info!(dispatched, "Time limit reached, no more jobs");
            break;
        }
        let job = Job::new(seq, Arc::clone(&spec));

        let sent = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, jobs.send(job)).await {
                Ok(sent) => sent,
                Err(_) => {
                    tracing::info!(dispatched, "Time limit reached, no more jobs");
                    break;
                }
            },
            None => jobs.send(job).await,
        };

        if sent.is_err() {
            tracing::warn!(dispatched, "Every worker has exited, no more jobs");
            break;
        }
        dispatched += 1;
    }

    jobs.close();
    tracing::debug!(dispatched, "Job queue closed");
    dispatched
}

/// Handle to a started run
#[derive(Debug)]
pub struct Dispatch {
    feeder: JoinHandle<usize>,
    workers: Vec<JoinHandle<WorkerStats>>,
}

/// What the dispatcher did over a run
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Jobs pushed into the queue
    pub dispatched: usize,

    /// Per-worker statistics, one entry per worker that exited cleanly
    pub workers: Vec<WorkerStats>,
}

impl DispatchReport {
    /// Sum of all worker statistics
    pub fn worker_totals(&self) -> WorkerStats {
        let mut totals = WorkerStats::new();
        for stats in &self.workers {
            totals.merge(stats);
        }
        totals
    }
}

impl Dispatch {
    /// Wait for the feeder and every worker to finish
    ///
    /// Call after the results have been drained; workers block on a full
    /// results channel otherwise.
    pub async fn finish(self) -> BenchResult<DispatchReport> {
        let dispatched = self
            .feeder
            .await
            .map_err(|e| BenchError::orchestration(format!("job feeder failed: {e}")))?;

        let mut workers = Vec::with_capacity(self.workers.len());
        let mut worker_failures = 0;
        for (idx, handle) in self.workers.into_iter().enumerate() {
            match handle.await {
                Ok(stats) => {
                    tracing::debug!(
                        worker_id = idx,
                        completed = stats.completed,
                        failed = stats.failed,
                        "Worker completed"
                    );
                    workers.push(stats);
                }
                Err(e) => {
                    worker_failures += 1;
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                }
            }
        }

        if workers.is_empty() && worker_failures > 0 {
            return Err(BenchError::orchestration(format!(
                "All {worker_failures} workers failed to complete"
            )));
        }

        let report = DispatchReport {
            dispatched,
            workers,
        };
        let totals = report.worker_totals();
        tracing::debug!(
            dispatched,
            handled = totals.total_requests(),
            failed = totals.failed,
            "Worker pool drained"
        );

        Ok(report)
    }
}
