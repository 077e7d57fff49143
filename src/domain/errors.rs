//! # Domain Errors
//!
//! Validation failures raised while constructing search criteria.
//!
//! Every variant describes input that is rejected before any provider is
//! contacted.
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_airport("C1K");
//! assert!(err.to_string().contains("C1K"));
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Airport code is empty or not a three-letter code.
    #[error("invalid airport code: {0:?}")]
    InvalidAirport(String),

    /// Origin and destination are the same airport.
    #[error("origin and destination must differ: {0}")]
    SameOriginAndDestination(String),

    /// Passenger count is zero.
    #[error("invalid passenger count: {0}")]
    InvalidPassengers(u32),

    /// Return date precedes the departure date.
    #[error("return date {return_date} is before departure date {departure_date}")]
    InvalidDateRange {
        /// Outbound departure date.
        departure_date: NaiveDate,
        /// Requested return date.
        return_date: NaiveDate,
    },

    /// A filter bound is inconsistent.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A time-of-day value could not be parsed.
    #[error("invalid time of day: {0:?}")]
    InvalidTimeOfDay(String),
}

impl DomainError {
    /// Creates an invalid airport error.
    #[must_use]
    pub fn invalid_airport(code: impl Into<String>) -> Self {
        Self::InvalidAirport(code.into())
    }

    /// Creates an invalid filter error.
    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter(message.into())
    }

    /// Creates an invalid time-of-day error.
    #[must_use]
    pub fn invalid_time_of_day(value: impl Into<String>) -> Self {
        Self::InvalidTimeOfDay(value.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
