//! # Filter Set
//!
//! Optional bounds applied to collected flights.
//!
//! Every field is optional; an absent field does not constrain the result.
//! Time windows are absolute timestamps. A time-of-day window such as
//! `"08:00"` is turned into an absolute timestamp with
//! [`FilterSet::anchor_time_of_day`] and, for a return leg, moved onto the
//! return date with [`FilterSet::reanchored_on`].
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::domain::value_objects::FilterSet;
//! use rust_decimal::Decimal;
//!
//! let filters = FilterSet::default()
//!     .with_max_price(Decimal::from(1_500_000))
//!     .with_max_stops(0)
//!     .with_airlines(["Garuda Indonesia", "ID"]);
//!
//! assert!(filters.validate().is_ok());
//! assert_eq!(filters.normalized_airlines().len(), 2);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional constraints on the flights returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Minimum fare amount, inclusive.
    pub min_price: Option<Decimal>,
    /// Maximum fare amount, inclusive.
    pub max_price: Option<Decimal>,
    /// Exact number of stops.
    pub stops: Option<u32>,
    /// Maximum number of stops, inclusive.
    pub max_stops: Option<u32>,
    /// Minimum duration in minutes, inclusive.
    pub min_duration: Option<i64>,
    /// Maximum duration in minutes, inclusive.
    pub max_duration: Option<i64>,
    /// Allowed airlines, matched by name or code.
    pub airlines: Vec<String>,
    /// Earliest accepted departure.
    pub depart_after: Option<DateTime<FixedOffset>>,
    /// Latest accepted departure.
    pub depart_before: Option<DateTime<FixedOffset>>,
    /// Earliest accepted arrival.
    pub arrive_after: Option<DateTime<FixedOffset>>,
    /// Latest accepted arrival.
    pub arrive_before: Option<DateTime<FixedOffset>>,
}

impl FilterSet {
    /// Sets the minimum price.
    #[must_use]
    pub fn with_min_price(mut self, value: Decimal) -> Self {
        self.min_price = Some(value);
        self
    }

    /// Sets the maximum price.
    #[must_use]
    pub fn with_max_price(mut self, value: Decimal) -> Self {
        self.max_price = Some(value);
        self
    }

    /// Sets the exact stop count.
    #[must_use]
    pub fn with_stops(mut self, value: u32) -> Self {
        self.stops = Some(value);
        self
    }

    /// Sets the maximum stop count.
    #[must_use]
    pub fn with_max_stops(mut self, value: u32) -> Self {
        self.max_stops = Some(value);
        self
    }

    /// Sets the minimum duration in minutes.
    #[must_use]
    pub fn with_min_duration(mut self, minutes: i64) -> Self {
        self.min_duration = Some(minutes);
        self
    }

    /// Sets the maximum duration in minutes.
    #[must_use]
    pub fn with_max_duration(mut self, minutes: i64) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Sets the allowed airlines.
    #[must_use]
    pub fn with_airlines<I, S>(mut self, airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines = airlines.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the earliest accepted departure.
    #[must_use]
    pub fn with_depart_after(mut self, value: DateTime<FixedOffset>) -> Self {
        self.depart_after = Some(value);
        self
    }

    /// Sets the latest accepted departure.
    #[must_use]
    pub fn with_depart_before(mut self, value: DateTime<FixedOffset>) -> Self {
        self.depart_before = Some(value);
        self
    }

    /// Sets the earliest accepted arrival.
    #[must_use]
    pub fn with_arrive_after(mut self, value: DateTime<FixedOffset>) -> Self {
        self.arrive_after = Some(value);
        self
    }

    /// Sets the latest accepted arrival.
    #[must_use]
    pub fn with_arrive_before(mut self, value: DateTime<FixedOffset>) -> Self {
        self.arrive_before = Some(value);
        self
    }

    /// Checks that lower bounds do not exceed upper bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFilter`] when a minimum is greater than
    /// its maximum, a duration bound is negative, or the exact stop count
    /// exceeds the maximum stop count.
    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::invalid_filter(format!(
                    "min_price {} is greater than max_price {}",
                    min, max
                )));
            }
        }
        if self.min_duration.is_some_and(|d| d < 0) || self.max_duration.is_some_and(|d| d < 0) {
            return Err(DomainError::invalid_filter("duration bounds must be positive"));
        }
        if let (Some(min), Some(max)) = (self.min_duration, self.max_duration) {
            if min > max {
                return Err(DomainError::invalid_filter(format!(
                    "min_duration {} is greater than max_duration {}",
                    min, max
                )));
            }
        }
        if let (Some(stops), Some(max_stops)) = (self.stops, self.max_stops) {
            if stops > max_stops {
                return Err(DomainError::invalid_filter(format!(
                    "stops {} is greater than max_stops {}",
                    stops, max_stops
                )));
            }
        }
        Ok(())
    }

    /// Returns the allowed airlines trimmed, lowercased and without blanks.
    #[must_use]
    pub fn normalized_airlines(&self) -> BTreeSet<String> {
        self.airlines
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect()
    }

    /// Returns a copy with every time window moved onto `date`.
    ///
    /// Hour, minute, second and offset are kept; only the calendar date
    /// changes.
    #[must_use]
    pub fn reanchored_on(&self, date: NaiveDate) -> Self {
        Self {
            depart_after: self.depart_after.map(|t| reanchor(t, date)),
            depart_before: self.depart_before.map(|t| reanchor(t, date)),
            arrive_after: self.arrive_after.map(|t| reanchor(t, date)),
            arrive_before: self.arrive_before.map(|t| reanchor(t, date)),
            ..self.clone()
        }
    }

    /// Serializes every field in a fixed order for use in cache keys.
    ///
    /// Absent fields serialize as empty strings so that two logically equal
    /// filter sets always produce the same string.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let airlines: Vec<String> = self.normalized_airlines().into_iter().collect();
        [
            optional_decimal(self.min_price),
            optional_decimal(self.max_price),
            optional_display(self.stops),
            optional_display(self.max_stops),
            optional_display(self.min_duration),
            optional_display(self.max_duration),
            optional_time(self.depart_after),
            optional_time(self.depart_before),
            optional_time(self.arrive_after),
            optional_time(self.arrive_before),
            airlines.join("|"),
        ]
        .join(",")
    }

    /// Builds an absolute timestamp from an `HH:MM` time of day on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTimeOfDay`] if `value` is not a valid
    /// `HH:MM` string.
    pub fn anchor_time_of_day(
        date: NaiveDate,
        value: &str,
        offset: FixedOffset,
    ) -> DomainResult<DateTime<FixedOffset>> {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map_err(|_| DomainError::invalid_time_of_day(value))?;
        date.and_time(time)
            .and_local_timezone(offset)
            .single()
            .ok_or_else(|| DomainError::invalid_time_of_day(value))
    }
}

fn reanchor(value: DateTime<FixedOffset>, date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(value.time())
        .and_local_timezone(*value.offset())
        .single()
        .unwrap_or(value)
}

fn optional_decimal(value: Option<Decimal>) -> String {
    value.map(|d| d.normalize().to_string()).unwrap_or_default()
}

fn optional_display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn optional_time(value: Option<DateTime<FixedOffset>>) -> String {
    value
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
        .unwrap_or_default()
}
