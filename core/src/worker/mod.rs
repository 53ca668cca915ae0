//! Worker module for executing benchmark requests
//!
//! The Worker is the unit of concurrency in httpbench. Its loop is
//! small: **receive job -> GET -> report outcome -> repeat**.
//!
//! Each Worker is a tokio task that:
//!
//! 1. Receives the next job token from the shared job queue
//! 2. Performs one GET through an [`HttpClient`](crate::HttpClient), bounded
//!    by the per-request timeout
//! 3. Converts the result, success or failure, into exactly one
//!    [`Outcome`](crate::Outcome)
//! 4. Sends the outcome to the aggregator
//! 5. Exits once the job queue is closed and drained
//!
//! Workers never touch run counters; the aggregator is their only writer.
//!
//! # Example
//!
//! ```ignore
//! use httpbench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .client(client)
//!     .jobs(jobs_rx)
//!     .results(results_tx)
//!     .build()?;
//!
//! let stats = worker.run().await;
//! println!("Handled: {}", stats.total_requests());
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::WorkerStats;
