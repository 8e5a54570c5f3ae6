//! Synapse LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `synapse-domain`. It supports multiple backends with a common async
//! interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use synapse_llm::MockProvider;
//! use synapse_domain::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use synapse_domain::LlmProvider;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A scripted reply for one prompt pattern
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Replies are keyed by substring: the first rule whose needle occurs in the
/// prompt wins, so callers can key on a filename or a template marker buried
/// inside a large prompt.
///
/// # Examples
///
/// ```
/// use synapse_llm::MockProvider;
/// use synapse_domain::LlmProvider;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::new("fallback");
/// provider.reply_when("alpha.txt", "alpha findings");
/// provider.fail_when("broken.txt");
///
/// assert_eq!(provider.generate("analyze alpha.txt").await.unwrap(), "alpha findings");
/// assert!(provider.generate("analyze broken.txt").await.is_err());
/// assert_eq!(provider.generate("anything else").await.unwrap(), "fallback");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Scripted)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Reply with `response` whenever the prompt contains `needle`
    pub fn reply_when(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.rules
            .lock()
            .unwrap()
            .push((needle.into(), Scripted::Reply(response.into())));
    }

    /// Fail whenever the prompt contains `needle`
    pub fn fail_when(&mut self, needle: impl Into<String>) {
        self.rules.lock().unwrap().push((
            needle.into(),
            Scripted::Fail("scripted mock failure".to_string()),
        ));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let rules = self.rules.lock().unwrap();
        for (needle, scripted) in rules.iter() {
            if prompt.contains(needle) {
                return match scripted {
                    Scripted::Reply(response) => Ok(response.clone()),
                    Scripted::Fail(reason) => Err(LlmError::Other(reason.clone())),
                };
            }
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_substring_rules() {
        let mut provider = MockProvider::default();
        provider.reply_when("hello", "world");
        provider.reply_when("foo", "bar");

        assert_eq!(provider.generate("say hello now").await.unwrap(), "world");
        assert_eq!(provider.generate("foo fighters").await.unwrap(), "bar");
        assert_eq!(
            provider.generate("unknown").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_failure() {
        let mut provider = MockProvider::default();
        provider.fail_when("bad prompt");

        let result = provider.generate("this is a bad prompt really").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_first_matching_rule_wins() {
        let mut provider = MockProvider::default();
        provider.reply_when("doc", "first");
        provider.reply_when("doc-2", "second");

        assert_eq!(provider.generate("doc-2 body").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        // Both share the same call count through the Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
