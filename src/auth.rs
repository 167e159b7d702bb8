//! Bearer-token verification for the save/list endpoints
//!
//! Handlers pass the raw `Authorization` header value through a
//! [`TokenVerifier`]; the verifier decides whether a token is required and
//! who the caller is. Three adapters cover the deployment shapes: no auth
//! (single local user), a static token map from config, and remote
//! verification against an identity provider.

use crate::config::{AuthConfig, AuthMode};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Timeout for remote token verification calls
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Authenticated user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Maps an optional bearer token to a user id, or rejects the request
#[async_trait]
pub trait TokenVerifier: Send + Sync + fmt::Debug {
    /// Authenticate a request given the raw bearer token, if any
    ///
    /// Returns `AppError::Auth` (HTTP 401) when a required token is missing
    /// or invalid. Must be called before any store access.
    async fn authenticate(&self, token: Option<&str>) -> AppResult<UserId>;
}

/// No verification: every caller is the same local user
///
/// This is the open gateway shape; saved courses all belong to "local".
#[derive(Debug)]
pub struct NoAuthVerifier;

#[async_trait]
impl TokenVerifier for NoAuthVerifier {
    async fn authenticate(&self, _token: Option<&str>) -> AppResult<UserId> {
        Ok(UserId::new("local"))
    }
}

/// Token-to-user map sourced from `[auth.tokens]` in the config file
#[derive(Debug)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn authenticate(&self, token: Option<&str>) -> AppResult<UserId> {
        let token = token.ok_or_else(|| AppError::Auth("missing token".to_string()))?;
        self.tokens
            .get(token)
            .map(|user| UserId::new(user.clone()))
            .ok_or_else(|| AppError::Auth("invalid token".to_string()))
    }
}

/// Remote verification against an identity provider
///
/// POSTs `{"idToken": "..."}` to the configured URL and expects a body shaped
/// like `{"users": [{"localId": "..."}]}` (the Identity Toolkit
/// `accounts:lookup` response). Any non-success status or unreadable body is
/// treated as an invalid token (401), never a 5xx.
#[derive(Debug)]
pub struct RemoteTokenVerifier {
    http: reqwest::Client,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
}

impl RemoteTokenVerifier {
    pub fn new(verify_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url: verify_url.into(),
        }
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn authenticate(&self, token: Option<&str>) -> AppResult<UserId> {
        let token = token.ok_or_else(|| AppError::Auth("missing token".to_string()))?;

        let response = self
            .http
            .post(&self.verify_url)
            .timeout(VERIFY_TIMEOUT)
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Token verification request failed");
                AppError::Auth("token verification failed".to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Identity provider rejected token");
            return Err(AppError::Auth("invalid token".to_string()));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|_| AppError::Auth("invalid token".to_string()))?;

        lookup
            .users
            .first()
            .map(|user| UserId::new(user.local_id.clone()))
            .ok_or_else(|| AppError::Auth("invalid token".to_string()))
    }
}

/// Build the verifier matching the configured auth mode
pub fn verifier_from_config(auth: &AuthConfig) -> AppResult<Box<dyn TokenVerifier>> {
    match auth.mode {
        AuthMode::None => Ok(Box::new(NoAuthVerifier)),
        AuthMode::Static => Ok(Box::new(StaticTokenVerifier::new(auth.tokens.clone()))),
        AuthMode::Remote => {
            let url = auth.verify_url.clone().ok_or_else(|| {
                AppError::Config("auth.verify_url is required for remote auth".to_string())
            })?;
            Ok(Box::new(RemoteTokenVerifier::new(url)))
        }
    }
}
