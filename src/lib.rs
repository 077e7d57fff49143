//! # Flight Aggregator
//!
//! Aggregates flight search results from several independent, unreliable
//! providers into one ranked and deduplicated result set.
//!
//! The crate is organised in layers:
//!
//! - [`domain`]: flight records, search criteria, filters and sort options
//! - [`application`]: the normalize/filter/dedup/score/sort pipeline, the
//!   retry policy, the fan-out orchestrator and the [`SearchFlights`] use case
//! - [`infrastructure`]: the provider port and its decorators, the TTL cache,
//!   configuration and tracing setup
//! - [`api`]: presentation helpers for outer layers
//!
//! # Examples
//!
//! ```ignore
//! use flight_aggregator::prelude::*;
//!
//! let criteria = SearchCriteria::builder("CGK", "DPS", date).build()?;
//! let outcome = use_case.search(&criteria).await?;
//! println!("{} flights", outcome.metadata.total_results);
//! ```
//!
//! [`SearchFlights`]: application::use_cases::SearchFlights

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

/// Commonly used types.
pub mod prelude {
    pub use crate::application::dto::{CriteriaEcho, SearchMetadata, SearchOutcome};
    pub use crate::application::error::{ApplicationError, ApplicationResult};
    pub use crate::application::use_cases::{AggregationConfig, SearchFlights};
    pub use crate::domain::entities::{Airline, Baggage, Fare, Flight, FlightBuilder, FlightPoint};
    pub use crate::domain::value_objects::{
        FilterSet, ProviderName, SearchCriteria, SearchRequest, SortField, SortOrder, SortSpec,
    };
    pub use crate::infrastructure::cache::TtlCache;
    pub use crate::infrastructure::providers::{
        FlightProvider, ProviderError, ProviderResult, RateLimitedProvider,
    };
    pub use tokio_util::sync::CancellationToken;
}
