//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::job::Job;
use crate::outcome::Outcome;
use crate::traits::HttpClient;

use super::executor::Worker;

use std::sync::Arc;
use tokio::sync::mpsc;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .client(client)
///     .jobs(jobs_rx)
///     .results(results_tx)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    client: Option<Arc<dyn HttpClient>>,
    jobs: Option<async_channel::Receiver<Job>>,
    results: Option<mpsc::Sender<Outcome>>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            client: None,
            jobs: None,
            results: None,
        }
    }

    /// Set the HTTP client
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the job queue receiver
    pub fn jobs(mut self, jobs: async_channel::Receiver<Job>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Set the outcome sender
    pub fn results(mut self, tx: mpsc::Sender<Outcome>) -> Self {
        self.results = Some(tx);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let client = self.client.ok_or(BenchError::missing_config("client"))?;
        let jobs = self.jobs.ok_or(BenchError::missing_config("jobs"))?;
        let results = self
            .results
            .ok_or(BenchError::missing_config("results"))?;

        Ok(Worker::new(self.id, client, jobs, results))
    }
}
