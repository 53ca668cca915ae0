//! Benchmark run: dispatcher + aggregator + summary

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::channel::ChannelConfig;
use crate::config::RequestSpec;
use crate::error::BenchResult;
use crate::outcome::Outcome;
use crate::summary::{derive, RunSummary};
use crate::target::Target;
use crate::traits::HttpClient;

use super::aggregator::{Aggregator, RunCounters};
use super::executor::{DispatchReport, Dispatcher};

/// A validated, ready-to-run benchmark
///
/// Use [`BenchmarkBuilder`](super::BenchmarkBuilder) to construct one.
pub struct Benchmark {
    spec: Arc<RequestSpec>,
    target: Target,
    client: Arc<dyn HttpClient>,
    channel_config: ChannelConfig,
    observer: Option<mpsc::UnboundedSender<Outcome>>,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Derived statistics
    pub summary: RunSummary,
    /// Frozen counters the summary was derived from
    pub counters: RunCounters,
    /// Dispatcher and worker bookkeeping
    pub dispatch: DispatchReport,
}

impl Benchmark {
    pub(crate) fn new(
        spec: Arc<RequestSpec>,
        target: Target,
        client: Arc<dyn HttpClient>,
        channel_config: ChannelConfig,
        observer: Option<mpsc::UnboundedSender<Outcome>>,
    ) -> Self {
        Self {
            spec,
            target,
            client,
            channel_config,
            observer,
        }
    }

    /// Run to completion
    ///
    /// Starts the run clock, dispatches every job, counts outcomes until
    /// all of them have arrived, then derives the summary. Per-request
    /// failures show up in the counts; an error here means the worker
    /// pool itself broke down.
    pub async fn run(self) -> BenchResult<RunOutcome> {
        let mut aggregator = Aggregator::new(self.spec.total_requests);
        if let Some(observer) = self.observer {
            aggregator = aggregator.with_observer(observer);
        }

        let dispatcher = Dispatcher::new(
            Arc::clone(&self.spec),
            Arc::clone(&self.client),
            self.channel_config,
        );
        let (dispatch, mut results) = dispatcher.start()?;

        let counters = aggregator.collect(&mut results).await;
        drop(results);

        let dispatch = dispatch.finish().await?;

        if counters.requests_attempted != dispatch.dispatched {
            tracing::error!(
                attempted = counters.requests_attempted,
                dispatched = dispatch.dispatched,
                "Outcome count does not match dispatched jobs"
            );
        } else if dispatch.dispatched < self.spec.total_requests {
            tracing::info!(
                dispatched = dispatch.dispatched,
                total_requests = self.spec.total_requests,
                "Run cut short by the time limit"
            );
        }

        let summary = derive(&counters, &self.spec, &self.target);

        tracing::info!(
            elapsed_secs = summary.time_taken.as_secs_f64(),
            completed = summary.requests_completed,
            failed = summary.failed_requests,
            rps = summary.requests_per_second,
            "Benchmark completed"
        );

        Ok(RunOutcome {
            summary,
            counters,
            dispatch,
        })
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("spec", &self.spec)
            .field("target", &self.target)
            .field("client", &self.client.name())
            .finish()
    }
}
