//! Command-line interface for Courseforge
//!
//! Provides argument parsing and subcommand handling for the binary.

use clap::{Parser, Subcommand};

/// Course outline generation gateway
#[derive(Parser)]
#[command(name = "courseforge")]
#[command(version)]
#[command(about = "HTTP gateway that turns prompts into structured course outlines")]
#[command(
    long_about = "Courseforge fronts a generative-text API with a small HTTP surface: \
    prompts become JSON course outlines via a model-fallback pipeline, and authenticated \
    users can save and list their courses."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Courseforge Configuration
# =========================

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 5000

[provider]
# API root of the generative-text service
base_url = "https://generativelanguage.googleapis.com"

# API key. If omitted, the GEMINI_API_KEY environment variable is used.
# api_key = "..."

# Preferred model, tried first
model = "gemini-2.5-flash"

# Models tried in order after the preferred one fails. Duplicates of the
# preferred model are skipped.
fallback_models = ["gemini-2.5-flash", "gemini-2.0-flash", "gemini-1.5-flash"]

# Per-call generation timeout in seconds (maximum 300)
timeout_seconds = 60

[cache]
# How long a generated course is served from cache for an identical prompt
ttl_seconds = 300

# Maximum number of cached prompts
max_entries = 256

[storage]
# "file" writes one JSON file per saved course under data_dir;
# "memory" keeps courses in the process only
backend = "file"
data_dir = "data"

[auth]
# "none": no token required, all saves belong to a single local user
# "static": tokens mapped to user ids in [auth.tokens]
# "remote": tokens POSTed to verify_url as {"idToken": "..."}
mode = "none"

# verify_url = "https://identitytoolkit.example/v1/accounts:lookup"

# [auth.tokens]
# "dev-token" = "dev-user"

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"

# Prometheus metrics are always available at /metrics on the server port
"#
}
