//! # Identifiers
//!
//! String-based identifiers for providers and flight records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a flight provider.
///
/// Ordering is plain byte-wise string ordering, which is what the
/// deduplication tie-break relies on.
///
/// # Examples
///
/// ```
/// use flight_aggregator::domain::value_objects::ProviderName;
///
/// let a = ProviderName::new("AirAsia");
/// let b = ProviderName::new("Batik Air");
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderName(String);

impl ProviderName {
    /// Creates a new provider name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProviderName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Provider-qualified flight identifier, e.g. `GA400_Garuda Indonesia`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(String);

impl FlightId {
    /// Creates an identifier from a raw value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Qualifies a provider-local flight identifier with the provider name.
    #[must_use]
    pub fn qualified(local_id: &str, provider: &ProviderName) -> Self {
        Self(format!("{}_{}", local_id, provider))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
