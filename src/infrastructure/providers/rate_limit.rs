//! # Rate Limiting
//!
//! Minimum spacing between calls to one provider.
//!
//! [`RateLimiter`] is a single-slot limiter: it allows at most one call per
//! interval and carries no burst credit. [`RateLimitedProvider`] wraps a
//! provider with its own limiter, so two wrapped instances never share state.
//!
//! # Examples
//!
//! ```ignore
//! use flight_aggregator::infrastructure::providers::RateLimitedProvider;
//! use std::time::Duration;
//!
//! let limited = RateLimitedProvider::new(Arc::new(provider), Duration::from_millis(100));
//! ```

use crate::domain::entities::Flight;
use crate::domain::value_objects::SearchRequest;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::FlightProvider;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Enforces a minimum interval between successive calls.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter. A zero interval disables limiting.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// Returns the configured interval.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next call slot is free and claims it.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Cancelled`] if `cancel` fires while waiting;
    /// the slot is not claimed in that case.
    pub async fn wait(&self, cancel: &CancellationToken) -> ProviderResult<()> {
        if self.interval.is_zero() {
            return Ok(());
        }
        loop {
            let remaining = {
                let mut last_call = self.last_call.lock();
                let now = Instant::now();
                match *last_call {
                    Some(last) if now.duration_since(last) < self.interval => {
                        self.interval - now.duration_since(last)
                    }
                    _ => {
                        *last_call = Some(now);
                        return Ok(());
                    }
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => return Err(ProviderError::cancelled()),
                _ = tokio::time::sleep(remaining) => {}
            }
        }
    }
}

/// Provider decorator that spaces calls through a [`RateLimiter`].
#[derive(Debug)]
pub struct RateLimitedProvider {
    inner: Arc<dyn FlightProvider>,
    limiter: RateLimiter,
}

impl RateLimitedProvider {
    /// Wraps `inner` with a limiter of the given interval.
    #[must_use]
    pub fn new(inner: Arc<dyn FlightProvider>, interval: Duration) -> Self {
        Self {
            inner,
            limiter: RateLimiter::new(interval),
        }
    }

    /// Returns the limiter interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.limiter.interval()
    }
}

#[async_trait]
impl FlightProvider for RateLimitedProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Flight>> {
        self.limiter.wait(cancel).await?;
        self.inner.search(request, cancel).await
    }
}
