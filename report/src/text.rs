//! Plain-text report in the style of classic HTTP benchmarking tools

use std::io::{self, Write};

use httpbench_core::RunSummary;

const LABEL_WIDTH: usize = 24;

/// Renders a [`RunSummary`] as the human readable report
pub struct TextReport<'a> {
    summary: &'a RunSummary,
}

impl<'a> TextReport<'a> {
    /// Report for `summary`, including the status breakdown
    pub fn new(summary: &'a RunSummary) -> Self {
        Self { summary }
    }

    /// Write the report
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = self.summary;

        line(out, "Hostname:", &s.hostname)?;
        line(out, "Port:", &s.port.to_string())?;
        writeln!(out)?;

        line(out, "Document Path:", &s.document_path)?;
        line(
            out,
            "Document Length:",
            &format!("{:.2} (bytes)", s.document_length_kb),
        )?;
        writeln!(out)?;

        line(out, "Concurrency Level:", &s.concurrency_level.to_string())?;
        line(
            out,
            "Time taken to test:",
            &format!("{:.2} (s)", s.time_taken.as_secs_f64()),
        )?;
        line(out, "Complete requests:", &s.requests_completed.to_string())?;
        line(out, "Failed requests:", &s.failed_requests.to_string())?;
        line(
            out,
            "Total transferred:",
            &format!("{:.2} (bytes)", s.total_bytes_transferred as f64 / 1024.0),
        )?;
        line(
            out,
            "Request per seconds:",
            &format!("{:.2} (requests/s)", s.requests_per_second),
        )?;
        line(
            out,
            "Time per request:",
            &format!("{:.2} (s)", s.time_per_request),
        )?;
        line(
            out,
            "Transfer rate:",
            &format!("{:.2} (Bytes/s)", s.transfer_rate_kbs),
        )?;

        if !s.status_counts.is_empty() {
            writeln!(out)?;
            writeln!(out, "Status breakdown:")?;
            for (status, count) in &s.status_counts {
                let label = match status {
                    0 => "error".to_string(),
                    code => code.to_string(),
                };
                writeln!(out, "  {label:<8}{count}")?;
            }
        }

        Ok(())
    }

    /// Render the report into a string
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn line<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{label:<width$}{value}", width = LABEL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn summary() -> RunSummary {
        RunSummary {
            hostname: "example.com".to_string(),
            port: 8080,
            document_path: "/index.html".to_string(),
            concurrency_level: 2,
            time_taken: Duration::from_millis(1500),
            requests_attempted: 10,
            requests_completed: 8,
            failed_requests: 2,
            total_bytes_transferred: 8192,
            requests_per_second: 6.666,
            time_per_request: 0.1,
            transfer_rate_kbs: 5.333,
            document_length_kb: 0.8,
            status_counts: BTreeMap::from([(0, 2), (200, 8)]),
        }
    }

    #[test]
    fn test_report_labels_and_values() {
        let summary = summary();
        let report = TextReport::new(&summary).render();

        assert!(report.contains("Hostname:               example.com\n"));
        assert!(report.contains("Port:                   8080\n"));
        assert!(report.contains("Document Path:          /index.html\n"));
        assert!(report.contains("Document Length:        0.80 (bytes)\n"));
        assert!(report.contains("Concurrency Level:      2\n"));
        assert!(report.contains("Time taken to test:     1.50 (s)\n"));
        assert!(report.contains("Complete requests:      8\n"));
        assert!(report.contains("Failed requests:        2\n"));
        assert!(report.contains("Total transferred:      8.00 (bytes)\n"));
        assert!(report.contains("Request per seconds:    6.67 (requests/s)\n"));
        assert!(report.contains("Time per request:       0.10 (s)\n"));
        assert!(report.contains("Transfer rate:          5.33 (Bytes/s)\n"));
    }

    #[test]
    fn test_status_breakdown() {
        let summary = summary();
        let report = TextReport::new(&summary).render();

        assert!(report.contains("Status breakdown:\n"));
        assert!(report.contains("  error   2\n"));
        assert!(report.contains("  200     8\n"));
    }

    #[test]
    fn test_empty_status_counts_skip_breakdown() {
        let mut summary = summary();
        summary.status_counts.clear();
        let report = TextReport::new(&summary).render();

        assert!(!report.contains("Status breakdown"));
    }
}
