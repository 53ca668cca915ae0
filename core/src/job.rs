//! Job tokens fed from the dispatcher to the worker pool

use std::sync::Arc;

use crate::config::RequestSpec;

/// One unit of work
///
/// Every request in a run is identical, so a job only points back at the
/// shared spec. `seq` is the dispatch order, used to trace which job an
/// outcome belongs to.
#[derive(Debug, Clone)]
pub struct Job {
    /// Dispatch sequence number, unique within a run
    pub seq: u64,
    /// Shared run description
    pub spec: Arc<RequestSpec>,
}

impl Job {
    /// Create a job token
    pub fn new(seq: u64, spec: Arc<RequestSpec>) -> Self {
        Self { seq, spec }
    }
}
