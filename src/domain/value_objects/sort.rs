//! # Sort Options
//!
//! Requested ordering of an aggregated result set.
//!
//! Parsing is lenient: unknown fields fall back to [`SortField::BestValue`]
//! and unknown orders to [`SortOrder::Asc`].
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::domain::value_objects::{SortField, SortOrder, SortSpec};
//!
//! let spec = SortSpec::parse("PRICE", "desc");
//! assert_eq!(spec.field(), SortField::Price);
//! assert_eq!(spec.order(), SortOrder::Desc);
//!
//! let fallback = SortSpec::parse("seats", "");
//! assert_eq!(fallback, SortSpec::default());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a result set can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Fare amount.
    Price,
    /// Duration in minutes.
    Duration,
    /// Departure timestamp.
    Departure,
    /// Arrival timestamp.
    Arrival,
    /// Composite best-value score.
    #[default]
    BestValue,
}

impl SortField {
    /// Parses a field name case-insensitively, falling back to best value.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => Self::Price,
            "duration" => Self::Duration,
            "departure" => Self::Departure,
            "arrival" => Self::Arrival,
            _ => Self::BestValue,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Departure => "departure",
            Self::Arrival => "arrival",
            Self::BestValue => "best_value",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Parses an order case-insensitively, falling back to ascending.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field and direction for sorting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    field: SortField,
    order: SortOrder,
}

impl SortSpec {
    /// Creates a sort option.
    #[must_use]
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parses loosely typed field and order strings.
    #[must_use]
    pub fn parse(field: &str, order: &str) -> Self {
        Self::new(SortField::parse_lossy(field), SortOrder::parse_lossy(order))
    }

    /// Returns the sort field.
    #[inline]
    #[must_use]
    pub fn field(&self) -> SortField {
        self.field
    }

    /// Returns the sort order.
    #[inline]
    #[must_use]
    pub fn order(&self) -> SortOrder {
        self.order
    }
}
