//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Everything that reaches this type is setup class and terminates the
/// process with a non-zero status; per-document and per-reduce failures are
/// absorbed lower down and reported as counts.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Provider construction error
    #[error("Provider error: {0}")]
    Provider(#[from] synapse_llm::LlmError),

    /// Pipeline setup error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] synapse_pipeline::PipelineError),

    /// Export ingestion error
    #[error("Ingest error: {0}")]
    Ingest(#[from] synapse_ingest::IngestError),
}
