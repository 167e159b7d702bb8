//! Generation pipeline: prompt -> provider with fallback -> sanitize -> parse
//!
//! Each stage is a small, separately testable piece; [`generate_course`]
//! composes them for the handler.

use crate::error::AppResult;
use crate::metrics::{AttemptOutcome, Metrics};
use crate::provider::{ProviderError, TextGenerator};
use serde_json::Value;

pub mod prompt;
pub mod sanitize;

pub use prompt::build_prompt;
pub use sanitize::strip_code_fence;

/// Try each candidate model in order, returning the first non-empty text.
///
/// Per-candidate failures are logged, counted, and recorded; an empty
/// response counts as a failure. Only after every candidate has been tried
/// does this fail, surfacing the last recorded error (or
/// [`ProviderError::Exhausted`] when the candidate list was empty).
pub async fn first_success(
    generator: &dyn TextGenerator,
    candidates: &[String],
    prompt: &str,
    metrics: &Metrics,
) -> Result<String, ProviderError> {
    let mut last_error: Option<ProviderError> = None;

    for model in candidates {
        tracing::info!(model = %model, "Attempting generation");
        match generator.generate(model, prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(model = %model, length = text.len(), "Generation succeeded");
                metrics.model_attempt(model, AttemptOutcome::Success);
                return Ok(text);
            }
            Ok(_) => {
                tracing::warn!(model = %model, "Model returned empty text, trying next");
                metrics.model_attempt(model, AttemptOutcome::Failure);
                last_error = Some(ProviderError::EmptyResponse);
            }
            Err(err) => {
                tracing::warn!(model = %model, error = %err, "Model failed, trying next");
                metrics.model_attempt(model, AttemptOutcome::Failure);
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or(ProviderError::Exhausted))
}

/// Parse sanitized provider text as JSON
///
/// Any JSON value is accepted as a course; the documented schema in
/// [`crate::course`] is not enforced here.
pub fn parse_course(text: &str) -> AppResult<Value> {
    serde_json::from_str(text).map_err(|e| crate::error::AppError::Parse(e.to_string()))
}

/// Run the full generation pipeline for a user prompt
pub async fn generate_course(
    generator: &dyn TextGenerator,
    candidates: &[String],
    user_prompt: &str,
    metrics: &Metrics,
) -> AppResult<Value> {
    let full_prompt = build_prompt(user_prompt);
    let raw = first_success(generator, candidates, &full_prompt, metrics).await?;
    let sanitized = strip_code_fence(&raw);
    parse_course(sanitized)
}
