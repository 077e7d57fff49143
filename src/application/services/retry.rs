//! # Retry
//!
//! Exponential backoff for transient provider failures.
//!
//! Only [`ProviderError::Transient`] is retried. The first backoff is 80 ms
//! and doubles after each retried attempt (80, 160, 320, ...). Every other
//! error aborts immediately. The backoff sleep observes cancellation.

use crate::domain::entities::Flight;
use crate::domain::value_objects::SearchRequest;
use crate::infrastructure::providers::{FlightProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(80);

/// Retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` retries, so at most
    /// `max_retries + 1` attempts.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Returns the retry limit.
    #[inline]
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the delay before retry number `retry` (0-based).
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry))
    }

    /// Runs `operation` until it succeeds, fails permanently or the retry
    /// limit is reached. `operation` receives the 0-based attempt number.
    ///
    /// # Errors
    ///
    /// Returns the last transient error once retries are exhausted, the first
    /// permanent error, or [`ProviderError::Cancelled`] if `cancel` fires
    /// during a backoff.
    pub async fn execute<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> ProviderResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ProviderResult<T>>,
    {
        let mut attempt = 0;
        loop {
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            if !error.is_transient() || attempt >= self.max_retries {
                return Err(error);
            }

            let backoff = self.backoff_for(attempt);
            warn!(
                attempt = attempt + 1,
                backoff_ms = backoff.as_millis() as u64,
                error = %error,
                "Transient provider failure, retrying"
            );
            tokio::select! {
                _ = cancel.cancelled() => return Err(ProviderError::cancelled()),
                _ = tokio::time::sleep(backoff) => {}
            }
            attempt += 1;
        }
    }
}

/// Provider decorator applying a [`RetryPolicy`].
#[derive(Debug)]
pub struct RetryingProvider {
    inner: Arc<dyn FlightProvider>,
    policy: RetryPolicy,
}

impl RetryingProvider {
    /// Wraps `inner` with `policy`.
    #[must_use]
    pub fn new(inner: Arc<dyn FlightProvider>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the policy.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl FlightProvider for RetryingProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Flight>> {
        let inner = &self.inner;
        self.policy
            .execute(cancel, move |attempt| {
                debug!(provider = %inner.name(), attempt = attempt + 1, "Calling provider");
                inner.search(request, cancel)
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug)]
    struct FlakyProvider {
        failures: u32,
        error: ProviderError,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32, error: ProviderError) -> Self {
            Self {
                failures,
                error,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FlightProvider for FlakyProvider {
        fn name(&self) -> &str {
            "Flaky"
        }

        async fn search(
            &self,
            _request: &SearchRequest,
            _cancel: &CancellationToken,
        ) -> ProviderResult<Vec<Flight>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(self.error.clone())
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn request() -> SearchRequest {
        SearchRequest {
            origin: "CGK".to_string(),
            destination: "DPS".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            passengers: 1,
            cabin_class: "economy".to_string(),
        }
    }

    fn retrying(inner: &Arc<FlakyProvider>, max_retries: u32) -> RetryingProvider {
        let inner: Arc<dyn FlightProvider> = inner.clone();
        RetryingProvider::new(inner, RetryPolicy::new(max_retries))
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(0), Duration::from_millis(80));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(160));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(320));
    }

    #[tokio::test(start_paused = true)]
    async fn two_transient_failures_then_success() {
        let inner = Arc::new(FlakyProvider::new(2, ProviderError::transient("busy")));
        let provider = retrying(&inner, 2);
        let start = Instant::now();

        let result = provider.search(&request(), &CancellationToken::new()).await;

        assert!(result.is_ok());
        assert_eq!(inner.calls(), 3);
        assert!(start.elapsed() >= Duration::from_millis(240));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_return_transient_error() {
        let inner = Arc::new(FlakyProvider::new(3, ProviderError::transient("busy")));
        let provider = retrying(&inner, 2);
        let start = Instant::now();

        let error = provider
            .search(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(error.is_transient());
        assert_eq!(inner.calls(), 3);
        assert!(start.elapsed() >= Duration::from_millis(240));
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_error_is_not_retried() {
        let inner = Arc::new(FlakyProvider::new(1, ProviderError::invalid_response("bad")));
        let provider = retrying(&inner, 2);

        let error = provider
            .search(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ProviderError::InvalidResponse { .. }));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let inner = Arc::new(FlakyProvider::new(1, ProviderError::transient("busy")));
        let provider = retrying(&inner, 0);

        assert!(provider.search(&request(), &CancellationToken::new()).await.is_err());
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_backoff() {
        let inner = Arc::new(FlakyProvider::new(5, ProviderError::transient("busy")));
        let provider = retrying(&inner, 4);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let error = provider.search(&request(), &cancel).await.unwrap_err();

        assert_eq!(error, ProviderError::Cancelled);
        assert_eq!(inner.calls(), 2);
    }
}
