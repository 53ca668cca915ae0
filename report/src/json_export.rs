//! JSON export functionality

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use httpbench_core::{Outcome, RequestSpec, RunSummary};
use serde::Serialize;

use crate::ReportError;

/// Writes a run's results as a single JSON document
pub struct JsonExporter;

#[derive(Serialize)]
struct Export<'a> {
    generated_at: DateTime<Utc>,
    spec: &'a RequestSpec,
    summary: &'a RunSummary,
    requests: &'a [Outcome],
}

impl JsonExporter {
    /// Export spec, summary and per-request outcomes to `path`
    pub fn export(
        spec: &RequestSpec,
        summary: &RunSummary,
        outcomes: &[Outcome],
        path: impl AsRef<Path>,
    ) -> Result<(), ReportError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        Self::write(spec, summary, outcomes, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the same document to any writer
    pub fn write<W: Write>(
        spec: &RequestSpec,
        summary: &RunSummary,
        outcomes: &[Outcome],
        writer: W,
    ) -> Result<(), ReportError> {
        let export = Export {
            generated_at: Utc::now(),
            spec,
            summary,
            requests: outcomes,
        };
        serde_json::to_writer_pretty(writer, &export)?;
        Ok(())
    }
}
