//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the remote
//! language-model service. Infrastructure implementations live in other
//! crates.

use async_trait::async_trait;
use thiserror::Error;

/// Error crossing the remote-call boundary
///
/// The pipeline treats the service as opaque: any failure, whatever its
/// cause on the provider side, is tallied or logged through this type and
/// never aborts the surrounding phase.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The provider reported a failure (network, model, rate limit, ...)
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered but the response could not be used
    #[error("unusable response: {0}")]
    InvalidResponse(String),
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (synapse-llm). Retries and
/// timeouts, if any, belong to the implementation; callers perform none.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::fmt::Display + Send;

    /// Generate a text completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Per-document extraction seam consumed by the map phase
///
/// Implemented by the application layer (synapse-extractor), which wraps a
/// prompt template around an [`LlmProvider`].
#[async_trait]
pub trait Extract: Send + Sync {
    /// Extract text from one document body
    ///
    /// `source_name` identifies the document (its filename) so the prompt
    /// can attribute content to its source.
    async fn extract(&self, text: &str, source_name: &str) -> Result<String, ExtractError>;
}

/// Aggregation seam consumed by the reduce phase
///
/// Called exactly once per reduce run with the ordered, concatenated map
/// artifacts.
#[async_trait]
pub trait Reduce: Send + Sync {
    /// Synthesize one result from the concatenated map outputs
    async fn reduce(&self, concatenated: &str) -> Result<String, ExtractError>;
}
