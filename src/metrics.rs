//! Prometheus metrics collection for Courseforge
//!
//! Tracks cache effectiveness, generation outcomes, and per-model fallback
//! attempts. Exposed at the `/metrics` endpoint in Prometheus text format.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Outcome label for a single model attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Failure => "failure",
        }
    }
}

/// Metrics collector for the generation gateway
pub struct Metrics {
    registry: Registry,
    cache_hits: IntCounter,
    cache_misses: IntCounter,
    generation_requests: IntCounter,
    generation_failures: IntCounter,
    model_attempts: IntCounterVec,
    courses_saved: IntCounter,
}

impl Metrics {
    /// Create a new Metrics instance with its own registry
    ///
    /// # Errors
    /// Returns an error if metric registration fails (e.g. duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cache_hits = IntCounter::with_opts(Opts::new(
            "courseforge_cache_hits_total",
            "Generation requests served from the prompt cache",
        ))?;
        let cache_misses = IntCounter::with_opts(Opts::new(
            "courseforge_cache_misses_total",
            "Generation requests that missed the prompt cache",
        ))?;
        let generation_requests = IntCounter::with_opts(Opts::new(
            "courseforge_generation_requests_total",
            "Valid generation requests received",
        ))?;
        let generation_failures = IntCounter::with_opts(Opts::new(
            "courseforge_generation_failures_total",
            "Generation requests that returned an error",
        ))?;
        let model_attempts = IntCounterVec::new(
            Opts::new(
                "courseforge_model_attempts_total",
                "Individual provider calls by model and outcome",
            ),
            &["model", "outcome"],
        )?;
        let courses_saved = IntCounter::with_opts(Opts::new(
            "courseforge_courses_saved_total",
            "Courses persisted to the configured store",
        ))?;

        registry.register(Box::new(cache_hits.clone()))?;
        registry.register(Box::new(cache_misses.clone()))?;
        registry.register(Box::new(generation_requests.clone()))?;
        registry.register(Box::new(generation_failures.clone()))?;
        registry.register(Box::new(model_attempts.clone()))?;
        registry.register(Box::new(courses_saved.clone()))?;

        Ok(Self {
            registry,
            cache_hits,
            cache_misses,
            generation_requests,
            generation_failures,
            model_attempts,
            courses_saved,
        })
    }

    pub fn cache_hit(&self) {
        self.cache_hits.inc();
    }

    pub fn cache_miss(&self) {
        self.cache_misses.inc();
    }

    pub fn generation_request(&self) {
        self.generation_requests.inc();
    }

    pub fn generation_failure(&self) {
        self.generation_failures.inc();
    }

    pub fn model_attempt(&self, model: &str, outcome: AttemptOutcome) {
        self.model_attempts
            .with_label_values(&[model, outcome.as_str()])
            .inc();
    }

    pub fn course_saved(&self) {
        self.courses_saved.inc();
    }

    /// Encode all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics output was not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_appear_in_gathered_output() {
        let metrics = Metrics::new().expect("should create metrics");
        metrics.cache_hit();
        metrics.cache_miss();
        metrics.generation_request();
        metrics.model_attempt("gemini-2.5-flash", AttemptOutcome::Failure);

        let output = metrics.gather().expect("should gather");
        assert!(output.contains("courseforge_cache_hits_total 1"));
        assert!(output.contains("courseforge_cache_misses_total 1"));
        assert!(output.contains("courseforge_generation_requests_total 1"));
        assert!(output.contains(r#"model="gemini-2.5-flash""#));
        assert!(output.contains(r#"outcome="failure""#));
    }

    #[test]
    fn test_independent_registries_do_not_collide() {
        let a = Metrics::new().expect("first registry");
        let b = Metrics::new().expect("second registry");
        a.cache_hit();
        assert!(b.gather().unwrap().contains("courseforge_cache_hits_total 0"));
    }
}
