//! # Application Services
//!
//! Building blocks of a search.
//!
//! - [`FanOutOrchestrator`]: concurrent per-leg provider calls
//! - [`RetryPolicy`]: backoff for transient failures
//! - [`process_leg`]: normalize, filter, deduplicate, score and sort
//! - [`RankingStrategy`]: best-value scoring

pub mod deduplication;
pub mod fan_out;
pub mod flight_filter;
pub mod pipeline;
pub mod ranking_strategy;
pub mod retry;

pub use deduplication::{dedup_key, deduplicate};
pub use fan_out::{FanOutOrchestrator, ProviderOutcome};
pub use flight_filter::{LegContext, filter_flights, normalize_durations};
pub use pipeline::process_leg;
pub use ranking_strategy::{BestValueStrategy, RankingStrategy, sort_flights};
pub use retry::{RetryPolicy, RetryingProvider};
