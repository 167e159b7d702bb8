//! Upstream text-generation provider seam
//!
//! The pipeline talks to the provider through the [`TextGenerator`] trait so
//! the fallback logic can be exercised with stub strategies in tests. Errors
//! cross this seam as tagged [`ProviderError`] variants; classification of
//! transport and HTTP failures happens here, in the provider layer, not in
//! the handlers.

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

/// Errors raised by a text-generation provider
///
/// Variants carry the raw provider message so handlers can surface it in a
/// `details` field without re-inspecting it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Rate limit or quota exhaustion (HTTP 429, or a body mentioning quota)
    #[error("quota exhausted: {0}")]
    Quota(String),

    /// Upstream unreachable (connection refused, DNS failure)
    #[error("provider unreachable: {0}")]
    Unavailable(String),

    /// The request exceeded its deadline
    #[error("timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The provider answered successfully but produced no text
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Every candidate model was tried and none recorded a usable result
    #[error("no model produced a response")]
    Exhausted,

    /// Anything else (malformed response body, unexpected HTTP status)
    #[error("{0}")]
    Other(String),
}

/// A single text-generation call: model identifier plus prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}
