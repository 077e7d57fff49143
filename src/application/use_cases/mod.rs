//! # Use Cases
//!
//! Entry points of the application layer.

pub mod cache_key;
pub mod search_flights;

pub use cache_key::cache_key;
pub use search_flights::{AggregationConfig, SearchFlights};
