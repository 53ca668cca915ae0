//! Builder pattern for Benchmark construction

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::channel::ChannelConfig;
use crate::config::RequestSpec;
use crate::error::{BenchError, BenchResult};
use crate::outcome::Outcome;
use crate::target::Target;
use crate::traits::HttpClient;

use super::runner::Benchmark;

/// Builder for creating a Benchmark with validated configuration
///
/// # Example
///
/// ```ignore
/// let benchmark = BenchmarkBuilder::new()
///     .spec(RequestSpec::new("http://localhost:8080/", 1000, 10))
///     .target(target)
///     .client(client)
///     .build()?;
///
/// let outcome = benchmark.run().await?;
/// ```
pub struct BenchmarkBuilder {
    spec: Option<RequestSpec>,
    target: Option<Target>,
    client: Option<Arc<dyn HttpClient>>,
    channel_config: ChannelConfig,
    observer: Option<mpsc::UnboundedSender<Outcome>>,
}

impl BenchmarkBuilder {
    /// Create a new builder with default channel configuration
    pub fn new() -> Self {
        Self {
            spec: None,
            target: None,
            client: None,
            channel_config: ChannelConfig::default(),
            observer: None,
        }
    }

    /// Set the run description
    pub fn spec(mut self, spec: RequestSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Set the resolved target used to label the summary
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the HTTP client
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the channel configuration
    pub fn channel_config(mut self, config: ChannelConfig) -> Self {
        self.channel_config = config;
        self
    }

    /// Receive every outcome as it is counted
    pub fn observer(mut self, observer: mpsc::UnboundedSender<Outcome>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the benchmark
    ///
    /// # Errors
    ///
    /// Returns an error if spec, target or client are not set, or if the
    /// spec fails validation. Nothing is spawned and no request is made in
    /// either case.
    pub fn build(self) -> BenchResult<Benchmark> {
        let spec = self.spec.ok_or_else(|| BenchError::missing_config("spec"))?;
        let target = self
            .target
            .ok_or_else(|| BenchError::missing_config("target"))?;
        let client = self
            .client
            .ok_or_else(|| BenchError::missing_config("client"))?;

        spec.validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        Ok(Benchmark::new(
            Arc::new(spec),
            target,
            client,
            self.channel_config,
            self.observer,
        ))
    }
}

impl Default for BenchmarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
