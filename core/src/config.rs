//! Run configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout applied when none is given
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request count implied by a time-limited run that does not name one
pub const TIME_LIMITED_REQUESTS: usize = 50_000;

/// Immutable description of one benchmark run
///
/// Built once from validated input and shared read-only by every worker
/// behind an `Arc`. Every job token points back at the same `RequestSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Absolute `http://` or `https://` URL to GET
    pub target_url: String,

    /// Number of requests to perform
    pub total_requests: usize,

    /// Number of requests in flight at once (size of the worker pool)
    pub concurrency: usize,

    /// Per-request timeout in seconds covering connect and body read; 0 disables it
    pub timeout_secs: u64,

    /// Optional bound on the whole run in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u64>,
}

impl RequestSpec {
    /// Create a spec with the default per-request timeout and no time limit
    pub fn new(target_url: impl Into<String>, total_requests: usize, concurrency: usize) -> Self {
        Self {
            target_url: target_url.into(),
            total_requests,
            concurrency,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            time_limit_secs: None,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the run time limit
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Run time limit, `None` when absent or zero
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_url.trim().is_empty() {
            return Err(ConfigError::MissingTarget);
        }

        if self.total_requests == 0 {
            return Err(ConfigError::InvalidRequestCount(
                "expected n > 0, got 0".into(),
            ));
        }

        if self.concurrency == 0 || self.concurrency > self.total_requests {
            return Err(ConfigError::InvalidConcurrency(format!(
                "expected 0 < c <= n ({}), got {}",
                self.total_requests, self.concurrency
            )));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No target URL was supplied
    #[error("the target URL is missing")]
    MissingTarget,

    /// Invalid `-n`
    #[error("invalid number of requests: {0}")]
    InvalidRequestCount(String),

    /// Invalid `-c`
    #[error("invalid concurrency: {0}")]
    InvalidConcurrency(String),
}
