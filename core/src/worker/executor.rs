//! Worker execution loop

use crate::clock::Stopwatch;
use crate::job::Job;
use crate::outcome::Outcome;
use crate::traits::{FetchError, HttpClient};

use super::stats::WorkerStats;

use std::sync::Arc;
use tokio::sync::mpsc;

/// Worker pulls jobs until the queue closes: receive -> GET -> report -> repeat
///
/// Workers share the HTTP client via Arc and compete for jobs on a
/// multi-consumer queue. Outcomes go out through an mpsc channel.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// HTTP client (shared across workers via Arc)
    client: Arc<dyn HttpClient>,

    /// Job queue (shared across workers)
    jobs: async_channel::Receiver<Job>,

    /// Channel sender for outcomes
    results: mpsc::Sender<Outcome>,
}

impl Worker {
    /// Create a new worker
    pub fn new(
        id: usize,
        client: Arc<dyn HttpClient>,
        jobs: async_channel::Receiver<Job>,
        results: mpsc::Sender<Outcome>,
    ) -> Self {
        Self {
            id,
            client,
            jobs,
            results,
        }
    }

    /// Run the worker loop
    ///
    /// Returns once the job queue is closed and drained, or if the results
    /// channel has been dropped.
    pub async fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        while let Ok(job) = self.jobs.recv().await {
            let outcome = self.execute_one(&job).await;
            stats.record(&outcome);

            if self.results.send(outcome).await.is_err() {
                tracing::debug!(
                    worker_id = self.id,
                    seq = job.seq,
                    "Results channel closed, worker stopping"
                );
                break;
            }
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            handled = stats.total_requests(),
            failed = stats.failed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        stats
    }

    /// Perform one request and turn whatever happens into an Outcome
    async fn execute_one(&self, job: &Job) -> Outcome {
        let timer = Stopwatch::start();
        let call = self.client.get(&job.spec.target_url);

        let result = match job.spec.timeout() {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(FetchError::Timeout(limit))),
            None => call.await,
        };
        let duration = timer.elapsed();

        match result {
            Ok(response) if response.is_success() => Outcome::success(
                job.seq,
                self.id,
                response.status,
                response.body_bytes,
                duration,
            ),
            Ok(response) => {
                tracing::debug!(
                    worker_id = self.id,
                    seq = job.seq,
                    status = response.status,
                    "Non-success status"
                );
                Outcome::failure(
                    job.seq,
                    self.id,
                    response.status,
                    response.body_bytes,
                    duration,
                    format!("non-success status {}", response.status),
                )
            }
            Err(e) => {
                tracing::debug!(
                    worker_id = self.id,
                    seq = job.seq,
                    error = %e,
                    "Request failed"
                );
                Outcome::failure(job.seq, self.id, 0, 0, duration, e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("client", &self.client.name())
            .finish()
    }
}
