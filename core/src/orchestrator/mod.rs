//! Orchestration of a benchmark run
//!
//! - The [`Dispatcher`] creates the bounded job queue, spawns the worker
//!   pool, and feeds exactly `total_requests` jobs before closing the queue
//! - The [`Aggregator`] is the single consumer of outcomes and the only
//!   writer of [`RunCounters`]; it stops after exactly the expected count
//! - [`Benchmark`] ties both together and derives the
//!   [`RunSummary`](crate::RunSummary)
//!
//! # Example
//!
//! ```ignore
//! use httpbench_core::{BenchmarkBuilder, RequestSpec, Target};
//!
//! let spec = RequestSpec::new("http://localhost:8080/", 1000, 10);
//! let target = Target::parse(&spec.target_url)?;
//!
//! let run = BenchmarkBuilder::new()
//!     .spec(spec)
//!     .target(target)
//!     .client(client)
//!     .build()?
//!     .run()
//!     .await?;
//! println!("{} req/s", run.summary.requests_per_second);
//! ```

mod aggregator;
mod builder;
mod executor;
mod runner;

pub use aggregator::{Aggregator, RunCounters};
pub use builder::BenchmarkBuilder;
pub use executor::{Dispatch, DispatchReport, Dispatcher};
pub use runner::{Benchmark, RunOutcome};
