//! Derived run statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::RequestSpec;
use crate::orchestrator::RunCounters;
use crate::target::Target;

/// Everything the report prints, computed once from frozen counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Target host
    pub hostname: String,
    /// Target port
    pub port: u16,
    /// Target path
    pub document_path: String,
    /// Worker pool size
    pub concurrency_level: usize,
    /// Run start to last outcome
    pub time_taken: Duration,

    /// Outcomes received
    pub requests_attempted: usize,
    /// Outcomes without an error
    pub requests_completed: usize,
    /// Outcomes with an error
    pub failed_requests: usize,
    /// Body bytes of completed requests
    pub total_bytes_transferred: u64,

    /// Attempted requests per second of run time
    pub requests_per_second: f64,
    /// Mean request duration in seconds over attempted requests
    pub time_per_request: f64,
    /// Kilobytes per second of run time
    pub transfer_rate_kbs: f64,
    /// Mean kilobytes per attempted request
    pub document_length_kb: f64,

    /// Outcomes per status code (0 for transport errors)
    pub status_counts: BTreeMap<u16, usize>,
}

/// Derive summary statistics from frozen counters
///
/// Pure arithmetic: the same counters always give the same summary.
///
/// Rates are not guarded against empty runs. With `requests_attempted == 0`
/// the per-request means are NaN, and with a zero `run_elapsed` the per-second
/// rates are NaN or infinite. Callers should only derive a summary once at
/// least one outcome has been counted.
pub fn derive(counters: &RunCounters, spec: &RequestSpec, target: &Target) -> RunSummary {
    let attempted = counters.requests_attempted as f64;
    let elapsed_secs = counters.run_elapsed.as_secs_f64();
    let bytes = counters.total_bytes_transferred as f64;

    RunSummary {
        hostname: target.hostname.clone(),
        port: target.port,
        document_path: target.document_path.clone(),
        concurrency_level: spec.concurrency,
        time_taken: counters.run_elapsed,
        requests_attempted: counters.requests_attempted,
        requests_completed: counters.requests_completed,
        failed_requests: counters.failed_requests(),
        total_bytes_transferred: counters.total_bytes_transferred,
        requests_per_second: attempted / elapsed_secs,
        time_per_request: counters.total_request_duration.as_secs_f64() / attempted,
        transfer_rate_kbs: (bytes / elapsed_secs) / 1024.0,
        document_length_kb: (bytes / 1024.0) / attempted,
        status_counts: counters.status_counts.clone(),
    }
}
