//! Cache fidelity tests for the generation endpoint
//!
//! Two identical prompts inside the TTL window must hit the provider at most
//! once and return identical payloads; distinct prompts and expired entries
//! must each trigger a fresh provider call.

use axum::{Extension, Json, extract::State};
use courseforge::auth::NoAuthVerifier;
use courseforge::cache::PromptCache;
use courseforge::config::Config;
use courseforge::handlers::{AppState, generate};
use courseforge::middleware::RequestId;
use courseforge::provider::{ProviderError, TextGenerator};
use courseforge::storage::MemoryStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Generator that always succeeds and counts upstream invocations
struct CountingGenerator {
    calls: AtomicUsize,
}

impl CountingGenerator {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{{\"courseTitle\":\"generation {}\",\"modules\":[]}}", n))
    }
}

fn test_config() -> Config {
    toml::from_str(
        r#"
[server]
host = "127.0.0.1"
port = 5000

[provider]
model = "model-a"
fallback_models = []
"#,
    )
    .expect("test config should parse")
}

fn state_with_ttl(generator: Arc<CountingGenerator>, ttl: Duration) -> AppState {
    AppState::with_components(
        test_config(),
        generator,
        Arc::new(PromptCache::new(ttl, 16)),
        Arc::new(MemoryStore::new()),
        Arc::new(NoAuthVerifier),
    )
}

async fn call_generate(state: AppState, prompt: &str) -> Value {
    let Json(body) = generate::handler(
        State(state),
        Extension(RequestId::new()),
        Json(json!({ "prompt": prompt })),
    )
    .await
    .expect("generation should succeed");
    body
}

#[tokio::test]
async fn test_second_identical_prompt_is_served_from_cache() {
    let stub = Arc::new(CountingGenerator::new());
    let state = state_with_ttl(stub.clone(), Duration::from_secs(300));

    let first = call_generate(state.clone(), "Intro to Python").await;
    let second = call_generate(state, "Intro to Python").await;

    assert_eq!(stub.calls(), 1, "upstream must be hit at most once");
    assert_eq!(first, second, "cached response must equal the original");
}

#[tokio::test]
async fn test_different_prompts_each_hit_upstream() {
    let stub = Arc::new(CountingGenerator::new());
    let state = state_with_ttl(stub.clone(), Duration::from_secs(300));

    call_generate(state.clone(), "Intro to Python").await;
    call_generate(state, "Intro to Rust").await;

    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn test_prompt_key_is_exact_string_no_normalization() {
    let stub = Arc::new(CountingGenerator::new());
    let state = state_with_ttl(stub.clone(), Duration::from_secs(300));

    call_generate(state.clone(), "Intro to Python").await;
    call_generate(state, "Intro to Python ").await;

    // Trailing whitespace makes a different key.
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn test_expired_entry_triggers_fresh_generation() {
    let stub = Arc::new(CountingGenerator::new());
    let state = state_with_ttl(stub.clone(), Duration::from_millis(20));

    let first = call_generate(state.clone(), "Intro to Python").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = call_generate(state, "Intro to Python").await;

    assert_eq!(stub.calls(), 2);
    assert_ne!(first, second, "regenerated payload comes from a new call");
}

#[tokio::test]
async fn test_failed_generation_is_not_cached() {
    struct FailOnceGenerator {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl TextGenerator for FailOnceGenerator {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, ProviderError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ProviderError::Unavailable("refused".to_string()))
            } else {
                Ok("{\"courseTitle\":\"recovered\",\"modules\":[]}".to_string())
            }
        }
    }

    let stub = Arc::new(FailOnceGenerator {
        calls: AtomicUsize::new(0),
    });
    let state = AppState::with_components(
        test_config(),
        stub.clone(),
        Arc::new(PromptCache::new(Duration::from_secs(300), 16)),
        Arc::new(MemoryStore::new()),
        Arc::new(NoAuthVerifier),
    );

    let err = generate::handler(
        State(state.clone()),
        Extension(RequestId::new()),
        Json(json!({"prompt": "p"})),
    )
    .await;
    assert!(err.is_err());

    // The failure must not have poisoned the cache for this prompt.
    let body = call_generate(state, "p").await;
    assert_eq!(body["courseTitle"], "recovered");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
}
