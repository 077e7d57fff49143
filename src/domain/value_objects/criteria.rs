//! # Search Criteria
//!
//! Validated input for one aggregated flight search.
//!
//! [`SearchCriteria`] can only be obtained through [`SearchCriteriaBuilder`],
//! so a value that exists has already passed validation: airport codes are
//! three ASCII letters (stored uppercase), origin and destination differ,
//! at least one passenger travels, the return date (if any) is not before the
//! departure date and the filter bounds are consistent. Deserialization
//! goes through the same builder.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use flight_aggregator::domain::value_objects::SearchCriteria;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let criteria = SearchCriteria::builder("cgk", "dps", date)
//!     .passengers(2)
//!     .cabin_class("Business")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(criteria.origin(), "CGK");
//! assert_eq!(criteria.cabin_class(), "business");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::filters::FilterSet;
use crate::domain::value_objects::sort::SortSpec;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cabin class used when none is requested.
pub const DEFAULT_CABIN_CLASS: &str = "economy";

/// Validated criteria for an aggregated search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSearchCriteria")]
pub struct SearchCriteria {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    passengers: u32,
    cabin_class: String,
    filters: FilterSet,
    sort: SortSpec,
}

impl SearchCriteria {
    /// Starts building criteria for a one-way or round-trip search.
    #[must_use]
    pub fn builder(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
    ) -> SearchCriteriaBuilder {
        SearchCriteriaBuilder::new(origin, destination, departure_date)
    }

    /// Returns the uppercase origin airport code.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the uppercase destination airport code.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the outbound departure date.
    #[inline]
    #[must_use]
    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    /// Returns the return date for round trips.
    #[inline]
    #[must_use]
    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Returns the passenger count.
    #[inline]
    #[must_use]
    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Returns the lowercase cabin class.
    #[inline]
    #[must_use]
    pub fn cabin_class(&self) -> &str {
        &self.cabin_class
    }

    /// Returns the filters.
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Returns the requested ordering.
    #[inline]
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Returns true if a return leg was requested.
    #[inline]
    #[must_use]
    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }

    /// Builds the provider request for the outbound leg.
    #[must_use]
    pub fn outbound_request(&self) -> SearchRequest {
        SearchRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date: self.departure_date,
            passengers: self.passengers,
            cabin_class: self.cabin_class.clone(),
        }
    }

    /// Builds the provider request for the return leg, if one was requested.
    ///
    /// Origin and destination are swapped.
    #[must_use]
    pub fn return_request(&self) -> Option<SearchRequest> {
        self.return_date.map(|date| SearchRequest {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            date,
            passengers: self.passengers,
            cabin_class: self.cabin_class.clone(),
        })
    }
}

/// Builder for [`SearchCriteria`].
#[derive(Debug, Clone)]
pub struct SearchCriteriaBuilder {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    passengers: u32,
    cabin_class: Option<String>,
    filters: FilterSet,
    sort: SortSpec,
}

impl SearchCriteriaBuilder {
    /// Creates a builder with one passenger, economy class, no filters and
    /// the default sort.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date: None,
            passengers: 1,
            cabin_class: None,
            filters: FilterSet::default(),
            sort: SortSpec::default(),
        }
    }

    /// Requests a return leg on `date`.
    #[must_use]
    pub fn return_date(mut self, date: NaiveDate) -> Self {
        self.return_date = Some(date);
        self
    }

    /// Sets the passenger count.
    #[must_use]
    pub fn passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    /// Sets the cabin class. Blank values keep the default.
    #[must_use]
    pub fn cabin_class(mut self, cabin_class: impl Into<String>) -> Self {
        self.cabin_class = Some(cabin_class.into());
        self
    }

    /// Sets the filters.
    #[must_use]
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the requested ordering.
    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Validates and builds the criteria.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if an airport code is malformed, origin
    /// equals destination, the passenger count is zero, the return date is
    /// before the departure date, or the filters are inconsistent.
    pub fn build(self) -> DomainResult<SearchCriteria> {
        let origin = normalize_airport(&self.origin)?;
        let destination = normalize_airport(&self.destination)?;
        if origin == destination {
            return Err(DomainError::SameOriginAndDestination(origin));
        }
        if self.passengers == 0 {
            return Err(DomainError::InvalidPassengers(self.passengers));
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(DomainError::InvalidDateRange {
                    departure_date: self.departure_date,
                    return_date,
                });
            }
        }
        self.filters.validate()?;

        let cabin_class = self
            .cabin_class
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CABIN_CLASS.to_string());

        Ok(SearchCriteria {
            origin,
            destination,
            departure_date: self.departure_date,
            return_date: self.return_date,
            passengers: self.passengers,
            cabin_class,
            filters: self.filters,
            sort: self.sort,
        })
    }
}

/// Unvalidated wire form of [`SearchCriteria`].
#[derive(Debug, Deserialize)]
struct RawSearchCriteria {
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    #[serde(default)]
    return_date: Option<NaiveDate>,
    #[serde(default = "default_passengers")]
    passengers: u32,
    #[serde(default)]
    cabin_class: Option<String>,
    #[serde(default)]
    filters: FilterSet,
    #[serde(default)]
    sort: SortSpec,
}

fn default_passengers() -> u32 {
    1
}

impl TryFrom<RawSearchCriteria> for SearchCriteria {
    type Error = DomainError;

    fn try_from(raw: RawSearchCriteria) -> DomainResult<Self> {
        SearchCriteriaBuilder {
            origin: raw.origin,
            destination: raw.destination,
            departure_date: raw.departure_date,
            return_date: raw.return_date,
            passengers: raw.passengers,
            cabin_class: raw.cabin_class,
            filters: raw.filters,
            sort: raw.sort,
        }
        .build()
    }
}

fn normalize_airport(code: &str) -> DomainResult<String> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::invalid_airport(code));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Request for one leg, as handed to each provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Departure airport code.
    pub origin: String,
    /// Arrival airport code.
    pub destination: String,
    /// Travel date.
    pub date: NaiveDate,
    /// Passenger count.
    pub passengers: u32,
    /// Lowercase cabin class.
    pub cabin_class: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::sort::{SortField, SortOrder};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_applies_defaults() {
        let criteria = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .build()
            .unwrap();

        assert_eq!(criteria.passengers(), 1);
        assert_eq!(criteria.cabin_class(), DEFAULT_CABIN_CLASS);
        assert!(!criteria.is_round_trip());
        assert_eq!(criteria.sort().field(), SortField::BestValue);
        assert_eq!(criteria.sort().order(), SortOrder::Asc);
    }

    #[test]
    fn build_normalizes_codes_and_cabin() {
        let criteria = SearchCriteria::builder(" cgk ", "dPs", date(2024, 6, 1))
            .cabin_class("  FIRST ")
            .build()
            .unwrap();

        assert_eq!(criteria.origin(), "CGK");
        assert_eq!(criteria.destination(), "DPS");
        assert_eq!(criteria.cabin_class(), "first");
    }

    #[test]
    fn blank_cabin_class_uses_default() {
        let criteria = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .cabin_class("   ")
            .build()
            .unwrap();
        assert_eq!(criteria.cabin_class(), "economy");
    }

    #[test]
    fn build_rejects_malformed_airports() {
        let result = SearchCriteria::builder("", "DPS", date(2024, 6, 1)).build();
        assert!(matches!(result, Err(DomainError::InvalidAirport(_))));

        let result = SearchCriteria::builder("CGK", "DP5", date(2024, 6, 1)).build();
        assert!(matches!(result, Err(DomainError::InvalidAirport(_))));
    }

    #[test]
    fn build_rejects_same_origin_and_destination() {
        let result = SearchCriteria::builder("CGK", "cgk", date(2024, 6, 1)).build();
        assert!(matches!(
            result,
            Err(DomainError::SameOriginAndDestination(_))
        ));
    }

    #[test]
    fn build_rejects_zero_passengers() {
        let result = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .passengers(0)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidPassengers(0))));
    }

    #[test]
    fn build_rejects_return_before_departure() {
        let result = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 10))
            .return_date(date(2024, 6, 9))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    }

    #[test]
    fn build_rejects_invalid_filters() {
        let filters = FilterSet::default()
            .with_min_price(Decimal::from(10))
            .with_max_price(Decimal::from(5));
        let result = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .filters(filters)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidFilter(_))));
    }

    #[test]
    fn return_request_swaps_route() {
        let criteria = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .return_date(date(2024, 6, 5))
            .passengers(3)
            .build()
            .unwrap();

        let outbound = criteria.outbound_request();
        assert_eq!(outbound.origin, "CGK");
        assert_eq!(outbound.date, date(2024, 6, 1));

        let inbound = criteria.return_request().unwrap();
        assert_eq!(inbound.origin, "DPS");
        assert_eq!(inbound.destination, "CGK");
        assert_eq!(inbound.date, date(2024, 6, 5));
        assert_eq!(inbound.passengers, 3);
    }

    #[test]
    fn deserialize_runs_builder_validation() {
        let json = r#"{
            "origin": "cgk",
            "destination": "cgk",
            "departure_date": "2024-06-01",
            "return_date": "2024-05-01",
            "passengers": 0,
            "cabin_class": "BUSINESS",
            "filters": {"min_price": "500", "max_price": "100"},
            "sort": {"field": "price", "order": "asc"}
        }"#;
        let err = serde_json::from_str::<SearchCriteria>(json).unwrap_err();
        assert!(err.to_string().contains("origin and destination must differ"));

        let zero_passengers = r#"{
            "origin": "CGK",
            "destination": "DPS",
            "departure_date": "2024-06-01",
            "passengers": 0
        }"#;
        let err = serde_json::from_str::<SearchCriteria>(zero_passengers).unwrap_err();
        assert!(err.to_string().contains("invalid passenger count"));

        let inverted_prices = r#"{
            "origin": "CGK",
            "destination": "DPS",
            "departure_date": "2024-06-01",
            "filters": {"min_price": "500", "max_price": "100"}
        }"#;
        assert!(serde_json::from_str::<SearchCriteria>(inverted_prices).is_err());
    }

    #[test]
    fn deserialize_normalizes_like_builder() {
        let json = r#"{
            "origin": "cgk",
            "destination": "dps",
            "departure_date": "2024-06-01",
            "cabin_class": "BUSINESS"
        }"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();

        assert_eq!(criteria.origin(), "CGK");
        assert_eq!(criteria.destination(), "DPS");
        assert_eq!(criteria.cabin_class(), "business");
        assert_eq!(criteria.passengers(), 1);
        assert_eq!(criteria.sort(), SortSpec::default());
    }

    #[test]
    fn serialized_criteria_deserialize_back() {
        let criteria = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .return_date(date(2024, 6, 5))
            .passengers(2)
            .build()
            .unwrap();
        let json = serde_json::to_string(&criteria).unwrap();
        let decoded: SearchCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, criteria);
    }

    #[test]
    fn one_way_has_no_return_request() {
        let criteria = SearchCriteria::builder("CGK", "DPS", date(2024, 6, 1))
            .build()
            .unwrap();
        assert!(criteria.return_request().is_none());
    }
}
