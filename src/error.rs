//! Error types for Courseforge
//!
//! All errors implement `IntoResponse` for Axum handlers. Upstream provider
//! failures arrive as tagged `ProviderError` variants (see [`crate::provider`])
//! and are mapped to HTTP statuses by a pure match, never by substring
//! inspection at the handler boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::provider::ProviderError;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("Provider quota exhausted: {0}")]
    UpstreamQuota(String),

    #[error("AI service is unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Provider request timed out after {seconds} seconds")]
    UpstreamTimeout { seconds: u64 },

    #[error("Provider request failed: {0}")]
    Upstream(String),

    #[error("Failed to parse provider response as JSON: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// HTTP status for this error variant
    ///
    /// Kept as a standalone pure function so the variant-to-status mapping is
    /// testable without building a response.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::UpstreamQuota(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Config(_) | Self::Upstream(_) | Self::Parse(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short user-facing summary for the `error` field of the response body
    fn summary(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Auth(msg) => format!("Unauthorized: {}", msg),
            Self::UpstreamQuota(_) => {
                "Service is busy (quota exceeded). Please try again in a few moments.".to_string()
            }
            Self::UpstreamUnavailable(_) => "AI service is unavailable".to_string(),
            Self::UpstreamTimeout { .. } => "Request timeout".to_string(),
            Self::Config(_) | Self::Upstream(_) | Self::Parse(_) | Self::Storage(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Optional `details` field carrying the raw error message
    ///
    /// Validation errors are already user-facing and carry no details.
    fn details(&self) -> Option<String> {
        match self {
            Self::Validation(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Quota(msg) => Self::UpstreamQuota(msg),
            ProviderError::Unavailable(msg) => Self::UpstreamUnavailable(msg),
            ProviderError::Timeout { seconds } => Self::UpstreamTimeout { seconds },
            ProviderError::EmptyResponse | ProviderError::Exhausted => {
                Self::Upstream(err.to_string())
            }
            ProviderError::Other(msg) => Self::Upstream(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.details() {
            Some(details) => Json(serde_json::json!({
                "error": self.summary(),
                "details": details,
            })),
            None => Json(serde_json::json!({
                "error": self.summary(),
            })),
        };

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
