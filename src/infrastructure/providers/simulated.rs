//! # Simulated Provider
//!
//! A provider that serves a fixed set of canonical records after a random
//! latency, failing transiently with a configured probability.
//!
//! It stands in for a real upstream during development and in tests. The
//! random source is injected so behaviour can be made deterministic.
//!
//! # Examples
//!
//! ```ignore
//! use flight_aggregator::infrastructure::providers::{SimulatedProvider, ThreadRandom};
//!
//! let provider = SimulatedProvider::from_json_file("AirAsia", "fixtures/airasia.json", Arc::new(ThreadRandom))?
//!     .with_latency_ms(50, 150)
//!     .with_failure_rate(0.1);
//! ```

use crate::domain::entities::Flight;
use crate::domain::value_objects::{ProviderName, SearchRequest};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::random::RandomSource;
use crate::infrastructure::providers::traits::FlightProvider;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Provider backed by an in-memory record set.
#[derive(Debug)]
pub struct SimulatedProvider {
    name: ProviderName,
    flights: Vec<Flight>,
    min_latency_ms: u64,
    max_latency_ms: u64,
    failure_rate: f64,
    rng: Arc<dyn RandomSource>,
}

impl SimulatedProvider {
    /// Creates a provider with no latency and no failures.
    #[must_use]
    pub fn new(
        name: impl Into<ProviderName>,
        flights: Vec<Flight>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            name: name.into(),
            flights,
            min_latency_ms: 0,
            max_latency_ms: 0,
            failure_rate: 0.0,
            rng,
        }
    }

    /// Loads canonical records from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] if the file cannot be read and
    /// [`ProviderError::InvalidResponse`] if it does not decode.
    pub fn from_json_file(
        name: impl Into<ProviderName>,
        path: impl AsRef<Path>,
        rng: Arc<dyn RandomSource>,
    ) -> ProviderResult<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let flights: Vec<Flight> = serde_json::from_str(&data)?;
        Ok(Self::new(name, flights, rng))
    }

    /// Sets the latency range in milliseconds, inclusive.
    #[must_use]
    pub fn with_latency_ms(mut self, min: u64, max: u64) -> Self {
        self.min_latency_ms = min.min(max);
        self.max_latency_ms = max.max(min);
        self
    }

    /// Sets the probability, in `[0, 1]`, of a transient failure per call.
    #[must_use]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Returns the number of records served.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if no records are served.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    fn latency(&self) -> Duration {
        let spread = self.max_latency_ms - self.min_latency_ms;
        Duration::from_millis(self.min_latency_ms + self.rng.up_to(spread))
    }
}

#[async_trait]
impl FlightProvider for SimulatedProvider {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Flight>> {
        let delay = self.latency();
        debug!(provider = %self.name, delay_ms = delay.as_millis() as u64, "simulating latency");

        tokio::select! {
            _ = cancel.cancelled() => return Err(ProviderError::cancelled()),
            _ = tokio::time::sleep(delay) => {}
        }

        if self.failure_rate > 0.0 && self.rng.unit() < self.failure_rate {
            return Err(ProviderError::transient(format!(
                "{} is temporarily unavailable",
                self.name
            )));
        }

        debug!(
            provider = %self.name,
            origin = %request.origin,
            destination = %request.destination,
            records = self.flights.len(),
            "serving simulated records"
        );
        Ok(self.flights.clone())
    }
}
