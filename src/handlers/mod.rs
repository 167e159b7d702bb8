//! HTTP request handlers for the Courseforge API

use crate::auth::{TokenVerifier, verifier_from_config};
use crate::cache::PromptCache;
use crate::config::{Config, StorageBackend};
use crate::error::AppResult;
use crate::metrics::Metrics;
use crate::provider::{GeminiClient, TextGenerator};
use crate::storage::{CourseStore, FileStore, MemoryStore};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod courses;
pub mod generate;
pub mod health;
pub mod metrics;

/// Application state shared across all handlers
///
/// The generator, cache, store, and verifier are injected components behind
/// Arc'd trait objects, so tests can swap in stubs without touching the
/// handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    generator: Arc<dyn TextGenerator>,
    cache: Arc<PromptCache>,
    store: Arc<dyn CourseStore>,
    verifier: Arc<dyn TokenVerifier>,
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Build production state from configuration
    ///
    /// Resolves the provider API key, opens the configured storage backend,
    /// and constructs the verifier matching the auth mode.
    pub fn new(config: Config) -> AppResult<Self> {
        let api_key = config.provider.resolve_api_key()?;
        let generator = Arc::new(GeminiClient::new(
            config.provider.base_url.clone(),
            api_key,
            Duration::from_secs(config.provider.timeout_seconds),
        ));

        let store: Arc<dyn CourseStore> = match config.storage.backend {
            StorageBackend::File => Arc::new(FileStore::new(&config.storage.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        let verifier: Arc<dyn TokenVerifier> = Arc::from(verifier_from_config(&config.auth)?);

        let cache = Arc::new(PromptCache::new(
            Duration::from_secs(config.cache.ttl_seconds),
            config.cache.max_entries,
        ));

        let metrics = Arc::new(
            Metrics::new()
                .map_err(|e| crate::error::AppError::Config(format!("metrics setup: {}", e)))?,
        );

        Ok(Self {
            config: Arc::new(config),
            generator,
            cache,
            store,
            verifier,
            metrics,
        })
    }

    /// Assemble state from pre-built components (used by tests)
    pub fn with_components(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        cache: Arc<PromptCache>,
        store: Arc<dyn CourseStore>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            generator,
            cache,
            store,
            verifier,
            metrics: Arc::new(Metrics::new().expect("metrics registry should build")),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    pub fn cache(&self) -> &PromptCache {
        &self.cache
    }

    pub fn store(&self) -> &dyn CourseStore {
        self.store.as_ref()
    }

    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Build the full application router
///
/// CORS is open to all origins on all routes, matching the browser-facing
/// deployment of the gateway.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route("/api/generate-course", post(generate::handler))
        .route("/api/save-course", post(courses::save_handler))
        .route("/api/courses", get(courses::list_handler))
        .route("/metrics", get(metrics::handler))
        .layer(middleware::from_fn(
            crate::middleware::request_id_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
