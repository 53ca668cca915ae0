//! In-memory HTTP client used by the engine tests

use crate::traits::{FetchError, FetchResponse, HttpClient};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) struct MockClient {
    status: u16,
    body_bytes: u64,
    delay: Option<Duration>,
    failing_calls: Vec<usize>,
    calls: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self {
            status: 200,
            body_bytes: 100,
            delay: None,
            failing_calls: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_body_bytes(mut self, bytes: u64) -> Self {
        self.body_bytes = bytes;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the calls with these (0-based) call indexes
    pub(crate) fn with_failing_calls(mut self, calls: &[usize]) -> Self {
        self.failing_calls = calls.to_vec();
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get(&self, _url: &str) -> Result<FetchResponse, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_calls.contains(&call) {
            return Err(FetchError::Connect("simulated failure".to_string()));
        }

        Ok(FetchResponse::new(self.status, self.body_bytes))
    }
}
