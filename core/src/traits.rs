//! HTTP client abstraction used by workers
//!
//! The trait lives in core so that workers can be exercised with in-memory
//! fakes; the real implementation is in the `httpbench-client` crate.

use async_trait::async_trait;
use std::time::Duration;

/// Client able to perform one GET and consume its body
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// GET `url`, read the whole body, and report status and body size
    ///
    /// Non-2xx statuses are returned as `Ok`; classifying them is up to the
    /// caller. Timeouts covering the whole call are applied by the worker.
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// Status and size of a fully read response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Bytes read from the body
    pub body_bytes: u64,
}

impl FetchResponse {
    /// Create a response record
    pub fn new(status: u16, body_bytes: u64) -> Self {
        Self { status, body_bytes }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-request failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The whole call exceeded the per-request timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Could not establish a connection
    #[error("connection failed: {0}")]
    Connect(String),

    /// Response headers arrived but the body could not be read
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other transport error
    #[error("request failed: {0}")]
    Request(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(FetchResponse::new(200, 0).is_success());
        assert!(FetchResponse::new(299, 0).is_success());
        assert!(!FetchResponse::new(301, 0).is_success());
        assert!(!FetchResponse::new(503, 0).is_success());
    }

    #[test]
    fn test_timeout_message() {
        let err = FetchError::Timeout(Duration::from_secs(2));
        assert_eq!(err.to_string(), "request timed out after 2s");
    }
}
