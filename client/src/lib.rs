//! reqwest-backed HTTP client for httpbench
//!
//! Implements [`HttpClient`] on top of a pooled `reqwest::Client`. Bodies
//! are streamed and counted rather than buffered, so large documents do not
//! inflate memory use under high concurrency.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use httpbench_core::{FetchError, FetchResponse, HttpClient};
use reqwest::Client;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the pooled HTTP client.
///
/// There is no request timeout here: the worker bounds each whole call with
/// the run's per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Connection timeout
    pub connect_timeout: Option<Duration>,

    /// TCP keepalive interval
    pub tcp_keepalive: Option<Duration>,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            connect_timeout: None,
            tcp_keepalive: Some(Duration::from_secs(60)),
            user_agent: format!("httpbench/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Create config with a connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Create config with custom pool size.
    pub fn with_pool_max_idle(mut self, max_idle: usize) -> Self {
        self.pool_max_idle_per_host = max_idle;
        self
    }
}

// ============================================================================
// Client
// ============================================================================

/// Shared HTTP client with connection pooling.
///
/// Cheap to clone; all clones share one connection pool. Keep-alive
/// connections are reused across workers.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Build a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent);

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(keepalive) = config.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();

        let mut body_bytes = 0u64;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FetchError::Body(e.to_string()))?;
            body_bytes += chunk.len() as u64;
        }

        tracing::trace!(url, status, body_bytes, "Response consumed");
        Ok(FetchResponse::new(status, body_bytes))
    }
}

/// Map a send error onto the core failure taxonomy
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() {
        FetchError::Connect(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
