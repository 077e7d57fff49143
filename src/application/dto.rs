//! # Search Outcome
//!
//! The value returned by a search call, and the value held in the cache.

use crate::domain::entities::Flight;
use crate::domain::value_objects::SearchCriteria;
use serde::{Deserialize, Serialize};

/// Date format used in the criteria echo.
const ISO_DATE: &str = "%Y-%m-%d";

/// Canonical echo of the criteria a search ran with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaEcho {
    /// Origin airport code, uppercased.
    pub origin: String,
    /// Destination airport code, uppercased.
    pub destination: String,
    /// Departure date as `YYYY-MM-DD`.
    pub departure_date: String,
    /// Return date as `YYYY-MM-DD`, if round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    /// Passenger count.
    pub passengers: u32,
    /// Cabin class, lowercased.
    pub cabin_class: String,
}

impl From<&SearchCriteria> for CriteriaEcho {
    fn from(criteria: &SearchCriteria) -> Self {
        Self {
            origin: criteria.origin().to_string(),
            destination: criteria.destination().to_string(),
            departure_date: criteria.departure_date().format(ISO_DATE).to_string(),
            return_date: criteria
                .return_date()
                .map(|date| date.format(ISO_DATE).to_string()),
            passengers: criteria.passengers(),
            cabin_class: criteria.cabin_class().to_string(),
        }
    }
}

/// Statistics about one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// Outbound plus return record count.
    pub total_results: usize,
    /// Number of registered providers.
    pub providers_queried: usize,
    /// Providers that succeeded on at least one leg.
    pub providers_succeeded: usize,
    /// `providers_queried - providers_succeeded`.
    pub providers_failed: usize,
    /// Wall time of this call in milliseconds.
    pub search_time_ms: u64,
    /// True if served from the cache.
    pub cache_hit: bool,
    /// Names of failed providers in registration order.
    #[serde(default)]
    pub failed_providers: Vec<String>,
}

/// Complete result of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Criteria echo.
    pub criteria: CriteriaEcho,
    /// Call statistics.
    pub metadata: SearchMetadata,
    /// Ranked outbound records.
    pub flights: Vec<Flight>,
    /// Ranked return records; empty for one-way searches.
    #[serde(default)]
    pub return_flights: Vec<Flight>,
}

impl SearchOutcome {
    /// Returns true if no record matched on either leg.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty() && self.return_flights.is_empty()
    }
}
