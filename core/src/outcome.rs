//! Per-request outcome records

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one request attempt
///
/// Exactly one `Outcome` is produced for every dispatched job, whether the
/// request succeeded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Sequence number of the job this outcome answers
    pub seq: u64,

    /// Worker that performed the request
    pub worker_id: usize,

    /// HTTP status code, 0 when no response was received
    pub status_code: u16,

    /// Number of body bytes consumed
    pub body_bytes: u64,

    /// Wall-clock span of the call (elapsed-so-far on failure)
    pub duration: Duration,

    /// Failure reason, `None` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// A successful request
    pub fn success(
        seq: u64,
        worker_id: usize,
        status_code: u16,
        body_bytes: u64,
        duration: Duration,
    ) -> Self {
        Self {
            seq,
            worker_id,
            status_code,
            body_bytes,
            duration,
            error: None,
        }
    }

    /// A failed request
    pub fn failure(
        seq: u64,
        worker_id: usize,
        status_code: u16,
        body_bytes: u64,
        duration: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            seq,
            worker_id,
            status_code,
            body_bytes,
            duration,
            error: Some(error.into()),
        }
    }

    /// Whether the request counts as completed
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
