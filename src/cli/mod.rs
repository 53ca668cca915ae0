//! CLI argument parsing and benchmark driver

use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use httpbench_client::{HttpConfig, ReqwestClient};
use httpbench_core::{
    BenchmarkBuilder, ConfigError, Outcome, RequestSpec, Target, DEFAULT_TIMEOUT_SECS,
    TIME_LIMITED_REQUESTS,
};
use httpbench_report::{JsonExporter, TextReport};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "httpbench")]
#[command(author, version, about = "Benchmark an HTTP server with concurrent GET requests", long_about = None)]
pub struct Cli {
    /// Number of requests to perform
    #[arg(short = 'n', value_name = "REQUESTS")]
    pub requests: Option<usize>,

    /// Number of requests to make at a time
    #[arg(short = 'c', value_name = "CONCURRENCY")]
    pub concurrency: usize,

    /// Seconds to wait for each response (0 waits forever)
    #[arg(short = 's', value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum seconds to spend benchmarking; implies -n 50000 when -n is omitted
    #[arg(short = 't', value_name = "SECONDS")]
    pub time_limit: Option<u64>,

    /// Write the summary and every request outcome to a JSON file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Target URL, http:// or https://
    #[arg(value_name = "URL")]
    pub url: String,
}

impl Cli {
    /// Turn the parsed flags into a validated run description
    pub fn request_spec(&self) -> Result<RequestSpec, ConfigError> {
        let total_requests = match (self.requests, self.time_limit) {
            (Some(n), _) => n,
            (None, Some(limit)) if limit > 0 => TIME_LIMITED_REQUESTS,
            _ => 0,
        };

        let mut spec = RequestSpec::new(self.url.clone(), total_requests, self.concurrency)
            .with_timeout_secs(self.timeout);
        if let Some(limit) = self.time_limit {
            spec = spec.with_time_limit_secs(limit);
        }

        spec.validate()?;
        Ok(spec)
    }

    /// Run the benchmark and print the report
    pub async fn run(&self) -> Result<ExitCode> {
        let spec = match self.request_spec() {
            Ok(spec) => spec,
            Err(e) => return Ok(usage_error(e)),
        };

        let target = Target::parse(&spec.target_url)
            .with_context(|| format!("Invalid target URL: {}", spec.target_url))?;

        let client =
            ReqwestClient::new(&http_config(&spec)).context("Failed to build HTTP client")?;

        println!("Running benchmark on {}\n", spec.target_url);

        let (observer_tx, observer_rx) = mpsc::unbounded_channel();
        let progress = self.progress_bar(spec.total_requests as u64);
        let observer = tokio::spawn(observe(observer_rx, progress, self.json.is_some()));

        let run = BenchmarkBuilder::new()
            .spec(spec.clone())
            .target(target)
            .client(Arc::new(client))
            .observer(observer_tx)
            .build()?
            .run()
            .await?;

        let outcomes = observer.await.context("Progress task failed")?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        TextReport::new(&run.summary).write_to(&mut out)?;
        out.flush()?;

        if let Some(path) = &self.json {
            JsonExporter::export(&spec, &run.summary, &outcomes, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("\nResults exported to: {}", path.display());
        }

        Ok(ExitCode::SUCCESS)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// One idle connection per worker; connecting never outlasts the request timeout
fn http_config(spec: &RequestSpec) -> HttpConfig {
    let config = HttpConfig::default().with_pool_max_idle(spec.concurrency);
    match spec.timeout() {
        Some(timeout) => config.with_connect_timeout(timeout),
        None => config,
    }
}

/// Print `message` followed by the usage text, for bad invocations
pub fn usage_error(message: impl Display) -> ExitCode {
    println!("{message}\n");
    println!("{}", Cli::command().render_help());
    ExitCode::FAILURE
}

/// Tick the progress bar per outcome, keeping outcomes only when exporting
async fn observe(
    mut outcomes: mpsc::UnboundedReceiver<Outcome>,
    progress: ProgressBar,
    keep: bool,
) -> Vec<Outcome> {
    let mut kept = Vec::new();
    while let Some(outcome) = outcomes.recv().await {
        progress.inc(1);
        if keep {
            kept.push(outcome);
        }
    }
    progress.finish_and_clear();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("httpbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_basic_flags() {
        let cli = parse(&["-n", "100", "-c", "10", "http://localhost:8080/"]);

        assert_eq!(cli.requests, Some(100));
        assert_eq!(cli.concurrency, 10);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cli.time_limit, None);
        assert!(!cli.quiet);
        assert_eq!(cli.url, "http://localhost:8080/");
    }

    #[test]
    fn test_request_spec_from_flags() {
        let cli = parse(&["-n", "20", "-c", "4", "-s", "5", "http://localhost/"]);
        let spec = cli.request_spec().unwrap();

        assert_eq!(spec.total_requests, 20);
        assert_eq!(spec.concurrency, 4);
        assert_eq!(spec.timeout_secs, 5);
        assert_eq!(spec.time_limit_secs, None);
    }

    #[test]
    fn test_time_limit_implies_request_count() {
        let cli = parse(&["-t", "10", "-c", "4", "http://localhost/"]);
        let spec = cli.request_spec().unwrap();

        assert_eq!(spec.total_requests, TIME_LIMITED_REQUESTS);
        assert_eq!(spec.time_limit_secs, Some(10));
    }

    #[test]
    fn test_explicit_count_wins_over_time_limit() {
        let cli = parse(&["-t", "10", "-n", "30", "-c", "4", "http://localhost/"]);
        assert_eq!(cli.request_spec().unwrap().total_requests, 30);
    }

    #[test]
    fn test_missing_request_count_rejected() {
        let cli = parse(&["-c", "4", "http://localhost/"]);
        assert!(matches!(
            cli.request_spec(),
            Err(ConfigError::InvalidRequestCount(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let cli = parse(&["-n", "10", "-c", "0", "http://localhost/"]);
        assert!(matches!(
            cli.request_spec(),
            Err(ConfigError::InvalidConcurrency(_))
        ));
    }

    #[test]
    fn test_concurrency_above_requests_rejected() {
        let cli = parse(&["-n", "2", "-c", "3", "http://localhost/"]);
        assert!(cli.request_spec().is_err());
    }

    #[test]
    fn test_http_config_follows_spec() {
        let spec = parse(&["-n", "8", "-c", "8", "-s", "3", "http://localhost/"])
            .request_spec()
            .unwrap();
        let config = http_config(&spec);
        assert_eq!(config.pool_max_idle_per_host, 8);
        assert_eq!(config.connect_timeout, Some(std::time::Duration::from_secs(3)));

        let spec = parse(&["-n", "8", "-c", "2", "-s", "0", "http://localhost/"])
            .request_spec()
            .unwrap();
        assert_eq!(http_config(&spec).connect_timeout, None);
    }

    #[test]
    fn test_huge_time_limit_is_accepted() {
        let cli = parse(&["-n", "3", "-c", "1", "-t", "18446744073709551615", "http://localhost/"]);
        assert_eq!(cli.request_spec().unwrap().time_limit_secs, Some(u64::MAX));
    }

    #[test]
    fn test_negative_count_is_a_parse_error() {
        let result =
            Cli::try_parse_from(["httpbench", "-n", "-5", "-c", "1", "http://localhost/"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_url_is_a_parse_error() {
        let result = Cli::try_parse_from(["httpbench", "-n", "5", "-c", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
