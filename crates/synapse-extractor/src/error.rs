//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur while parsing LLM responses
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Response does not have the expected shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Response is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
