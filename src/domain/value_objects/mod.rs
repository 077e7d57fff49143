//! # Value Objects
//!
//! Immutable types describing what is being searched for.
//!
//! ## Identity Types
//!
//! - [`ProviderName`]: name of a flight provider, ordered for tie-breaks
//! - [`FlightId`]: provider-qualified flight identifier
//!
//! ## Search Types
//!
//! - [`SearchCriteria`]: validated criteria for one aggregated search
//! - [`SearchRequest`]: the per-leg request handed to providers
//! - [`FilterSet`]: optional bounds applied after collection
//! - [`SortSpec`]: requested ordering of the result set

pub mod criteria;
pub mod filters;
pub mod ids;
pub mod sort;

pub use criteria::{DEFAULT_CABIN_CLASS, SearchCriteria, SearchCriteriaBuilder, SearchRequest};
pub use filters::FilterSet;
pub use ids::{FlightId, ProviderName};
pub use sort::{SortField, SortOrder, SortSpec};
