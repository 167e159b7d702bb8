//! HTTP client for Gemini-style `generateContent` endpoints
//!
//! Speaks the REST shape `POST {base_url}/v1beta/models/{model}:generateContent`
//! with the API key in the `x-goog-api-key` header. Transport failures and
//! HTTP statuses are classified into [`ProviderError`] variants here so the
//! rest of the pipeline never looks at reqwest errors.

use super::{ProviderError, TextGenerator};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Wire shape of a successful generateContent response
///
/// Only the fields the pipeline reads; everything else is ignored.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// Client for a Gemini-style text-generation API
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client
    ///
    /// `base_url` is the API root (for example
    /// `https://generativelanguage.googleapis.com`); trailing slashes are
    /// tolerated. `timeout` bounds each individual generation call.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        }
    }

    fn request_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Classify a reqwest transport error into a provider error
    fn classify_transport(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ProviderError::Unavailable(err.to_string())
        } else {
            ProviderError::Other(err.to_string())
        }
    }
}

/// Classify a non-success HTTP status plus body into a provider error
///
/// 429 is always quota. Other failure bodies are still sniffed for
/// quota wording because some deployments report exhaustion as 400/403
/// with a RESOURCE_EXHAUSTED message.
fn classify_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return ProviderError::Quota(format!("HTTP 429: {}", body));
    }
    let lowered = body.to_lowercase();
    if lowered.contains("quota") || lowered.contains("resource_exhausted") || body.contains("429") {
        return ProviderError::Quota(format!("HTTP {}: {}", status.as_u16(), body));
    }
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        return ProviderError::Unavailable(format!("HTTP 503: {}", body));
    }
    ProviderError::Other(format!("HTTP {}: {}", status.as_u16(), body))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = self.request_url(model);
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(
            model = model,
            prompt_length = prompt.len(),
            timeout_seconds = self.timeout.as_secs(),
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("malformed provider response: {}", e)))?;

        Ok(parsed.text())
    }
}
