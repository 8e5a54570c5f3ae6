//! Synapse Ingest
//!
//! Converters that turn raw chat exports into the plain-text transcripts
//! the pipeline consumes. Currently: Telegram JSON exports.

#![warn(missing_docs)]

pub mod telegram;

use thiserror::Error;

pub use telegram::parse_telegram_export;

/// Errors that can occur while converting an export
#[derive(Debug, Error)]
pub enum IngestError {
    /// File read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Topic mapping file is not valid CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Topic mapping rows are missing or malformed
    #[error("Invalid topic mapping: {0}")]
    TopicMapping(String),
}
