//! Configuration management for Courseforge
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Invariants (timeout bounds, auth mode prerequisites, cache bounds) are
//! checked once in [`Config::validate`] at load time.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable consulted when `provider.api_key` is not set
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field invariants not expressible in serde
    pub fn validate(&self) -> AppResult<()> {
        if self.provider.model.trim().is_empty() {
            return Err(AppError::Config(
                "provider.model must not be empty".to_string(),
            ));
        }
        if self.provider.timeout_seconds == 0 || self.provider.timeout_seconds > 300 {
            return Err(AppError::Config(format!(
                "provider.timeout_seconds must be in (0, 300], got {}",
                self.provider.timeout_seconds
            )));
        }
        if self.cache.ttl_seconds == 0 {
            return Err(AppError::Config(
                "cache.ttl_seconds must be greater than 0".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(AppError::Config(
                "cache.max_entries must be greater than 0".to_string(),
            ));
        }
        match self.auth.mode {
            AuthMode::Remote if self.auth.verify_url.is_none() => Err(AppError::Config(
                "auth.verify_url is required when auth.mode = \"remote\"".to_string(),
            )),
            AuthMode::Static if self.auth.tokens.is_empty() => Err(AppError::Config(
                "auth.tokens must not be empty when auth.mode = \"static\"".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream text-generation provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API root, without the `/v1beta/models/...` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Preferred model, tried first
    #[serde(default = "default_model")]
    pub model: String,
    /// Models tried in order after the preferred one fails
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,
    /// Per-call generation timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    /// Ordered, de-duplicated candidate list: preferred model first, then the
    /// fallback sequence with repeats of earlier entries removed.
    pub fn model_candidates(&self) -> Vec<String> {
        let mut candidates = vec![self.model.clone()];
        for fallback in &self.fallback_models {
            if !candidates.contains(fallback) {
                candidates.push(fallback.clone());
            }
        }
        candidates
    }

    /// Resolve the API key from config or environment
    pub fn resolve_api_key(&self) -> AppResult<String> {
        if let Some(key) = &self.api_key
            && !key.trim().is_empty()
        {
            return Ok(key.clone());
        }
        std::env::var(API_KEY_ENV).map_err(|_| {
            AppError::Config(format!(
                "no provider API key: set provider.api_key or the {} environment variable",
                API_KEY_ENV
            ))
        })
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            fallback_models: default_fallback_models(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_fallback_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
    ]
}

fn default_generation_timeout() -> u64 {
    60
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Time-to-live for cached generations in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached prompts
    #[serde(default = "default_cache_capacity")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
            max_entries: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    256
}

/// Course persistence backend selection
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per saved course under `storage.data_dir`
    #[default]
    File,
    /// Process-local, lost on restart
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Token verification mode for the save/list endpoints
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// No verification; every request acts as a single local user
    #[default]
    None,
    /// Tokens mapped to user ids in `auth.tokens`
    Static,
    /// Tokens POSTed to `auth.verify_url` for verification
    Remote,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    /// Identity-provider endpoint for remote verification
    #[serde(default)]
    pub verify_url: Option<String>,
    /// token -> user id map for static verification
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
