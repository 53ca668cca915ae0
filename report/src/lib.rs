//! Report generation for benchmark results
//!
//! This crate provides:
//!
//! - The plain-text report printed after a run
//! - JSON export of the summary and every per-request outcome

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json_export;
pub mod text;

pub use json_export::JsonExporter;
pub use text::TextReport;

use thiserror::Error;

/// Report generation errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// Could not write the output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Could not serialize the results
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
