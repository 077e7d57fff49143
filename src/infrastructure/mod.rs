//! # Infrastructure Layer
//!
//! Adapters and plumbing around the aggregation core.
//!
//! - [`providers`]: the provider port, rate limiting and simulated sources
//! - [`cache`]: the TTL result cache
//! - [`config`]: layered settings
//! - [`telemetry`]: tracing subscriber setup

pub mod cache;
pub mod config;
pub mod providers;
pub mod telemetry;
