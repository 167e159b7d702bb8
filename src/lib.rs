//! Courseforge - course outline generation gateway
//!
//! This library fronts a generative-text provider with a small HTTP API:
//! prompts go in, structured course outlines (JSON) come out, and
//! authenticated users can persist and list their generated courses.

pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod pipeline;
pub mod provider;
pub mod storage;
pub mod telemetry;
