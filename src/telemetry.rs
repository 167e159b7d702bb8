//! Structured logging setup
//!
//! Installs a tracing-subscriber pipeline once per process. The filter comes
//! from `RUST_LOG` when set, otherwise from the configured default level
//! applied to this crate and to tower-http's request traces.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Directive string used when `RUST_LOG` is absent
fn default_filter(level: &str) -> String {
    format!("courseforge={level},tower_http=debug")
}

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_crate_and_http_traces() {
        let directive = default_filter("warn");
        assert!(directive.contains("courseforge=warn"));
        assert!(directive.contains("tower_http=debug"));
    }
}
