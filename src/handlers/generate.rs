//! Course generation endpoint
//!
//! POST /api/generate-course: validate the prompt, serve from the result
//! cache when fresh, otherwise run the generation pipeline and cache the
//! parsed payload.

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::RequestId;
use crate::pipeline;
use axum::{Extension, Json, extract::State};
use serde_json::Value;

/// Extract and validate the prompt field from the request body
///
/// The body must be a JSON object with a non-empty string `prompt`. Anything
/// else is a validation error (HTTP 400) and the provider is never called.
fn extract_prompt(body: &Value) -> AppResult<&str> {
    let prompt = body
        .get("prompt")
        .ok_or_else(|| {
            AppError::Validation("Missing or invalid prompt in request body".to_string())
        })?
        .as_str()
        .ok_or_else(|| {
            AppError::Validation("Missing or invalid prompt in request body".to_string())
        })?;

    if prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }
    Ok(prompt)
}

/// POST /api/generate-course handler
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let prompt = extract_prompt(&body)?;

    tracing::info!(
        request_id = %request_id,
        prompt_length = prompt.len(),
        "Received course generation request"
    );
    state.metrics().generation_request();

    // Cache key is the exact untrimmed prompt as sent by the client.
    if let Some(cached) = state.cache().get(prompt) {
        tracing::info!(request_id = %request_id, "Serving generation from cache");
        state.metrics().cache_hit();
        return Ok(Json(cached));
    }
    state.metrics().cache_miss();

    let candidates = state.config().provider.model_candidates();
    let course = pipeline::generate_course(state.generator(), &candidates, prompt, state.metrics())
        .await
        .inspect_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Generation failed");
            state.metrics().generation_failure();
        })?;

    state.cache().put(prompt, course.clone());
    tracing::info!(request_id = %request_id, "Course generated successfully");
    Ok(Json(course))
}
