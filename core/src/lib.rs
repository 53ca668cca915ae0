//! httpbench-core: concurrent HTTP GET benchmark engine
//!
//! This crate holds everything between a validated run description and a
//! finished summary:
//!
//! - Run configuration and target resolution
//! - The [`HttpClient`] trait workers call through
//! - The worker pool, dispatcher and single-writer aggregator
//! - Summary math over frozen counters
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod clock;
pub mod config;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod outcome;
pub mod summary;
pub mod target;
pub mod traits;
pub mod worker;

#[cfg(test)]
mod mock;

pub use channel::ChannelConfig;
pub use config::{ConfigError, RequestSpec, DEFAULT_TIMEOUT_SECS, TIME_LIMITED_REQUESTS};
pub use error::*;
pub use job::Job;
pub use orchestrator::{
    Aggregator, Benchmark, BenchmarkBuilder, Dispatch, DispatchReport, Dispatcher, RunCounters,
    RunOutcome,
};
pub use outcome::Outcome;
pub use summary::{derive, RunSummary};
pub use target::{Target, TargetError};
pub use traits::*;
pub use worker::{Worker, WorkerBuilder, WorkerStats};
