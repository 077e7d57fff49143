//! # Flight Provider Trait
//!
//! Port definition for flight sources.
//!
//! Each adapter translates its own response format into [`Flight`] records
//! and classifies its failures as transient or permanent. Decorators such as
//! [`RateLimitedProvider`](super::RateLimitedProvider) implement the same
//! trait and forward to an inner provider, so any number of them can be
//! stacked.
//!
//! # Cancellation
//!
//! Implementations must watch the supplied [`CancellationToken`] at every
//! suspension point and return [`ProviderError::Cancelled`] promptly once it
//! fires. They must never return partial data after cancellation.
//!
//! [`ProviderError::Cancelled`]: super::error::ProviderError::Cancelled

use crate::domain::entities::Flight;
use crate::domain::value_objects::SearchRequest;
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// A source of flight offers.
#[async_trait]
pub trait FlightProvider: Send + Sync + fmt::Debug {
    /// Returns the provider name used in metadata and tie-breaks.
    fn name(&self) -> &str;

    /// Searches flights for one leg.
    ///
    /// # Errors
    ///
    /// Returns a transient error for momentary faults, and a permanent error
    /// for everything else, including cancellation.
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Flight>>;
}

