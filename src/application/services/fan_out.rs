//! # Fan-Out Orchestrator
//!
//! Concurrent search across every registered provider for one leg.
//!
//! Each provider runs in its own tokio task under a child of the caller's
//! cancellation token and its own deadline. A slow, failing or panicking
//! provider never cancels a sibling. All tasks are joined before
//! [`FanOutOrchestrator::search_all`] returns.

use crate::application::services::retry::{RetryPolicy, RetryingProvider};
use crate::domain::entities::Flight;
use crate::domain::value_objects::SearchRequest;
use crate::infrastructure::providers::{FlightProvider, ProviderError, ProviderResult};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, warn};

/// Default per-provider deadline in milliseconds.
pub const DEFAULT_PER_PROVIDER_TIMEOUT_MS: u64 = 1000;

/// Result of one provider for one leg.
#[derive(Debug, Clone)]
pub struct ProviderOutcome {
    /// Provider name.
    pub provider: String,
    /// Records or the final error.
    pub result: ProviderResult<Vec<Flight>>,
}

impl ProviderOutcome {
    /// Returns true if the provider answered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs one leg against every provider concurrently.
#[derive(Debug, Clone)]
pub struct FanOutOrchestrator {
    providers: Vec<Arc<dyn FlightProvider>>,
    per_provider_timeout: Duration,
}

impl FanOutOrchestrator {
    /// Creates an orchestrator that wraps every provider with `retry`.
    ///
    /// Registration order is kept and reported by [`provider_names`].
    ///
    /// [`provider_names`]: FanOutOrchestrator::provider_names
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn FlightProvider>>,
        retry: RetryPolicy,
        per_provider_timeout: Duration,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| {
                Arc::new(RetryingProvider::new(provider, retry)) as Arc<dyn FlightProvider>
            })
            .collect();
        Self {
            providers,
            per_provider_timeout,
        }
    }

    /// Returns the number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns provider names in registration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Queries every provider and joins all of them.
    ///
    /// Provider failures are reported in the outcomes, never as an error.
    /// Outcomes follow registration order.
    pub async fn search_all(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Vec<ProviderOutcome> {
        let mut names = Vec::with_capacity(self.providers.len());
        let mut handles = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name().to_string();
            let provider = Arc::clone(provider);
            let request = request.clone();
            let child = cancel.child_token();
            let deadline = self.per_provider_timeout;
            let span = debug_span!("provider_search", provider = %name);

            let handle = tokio::spawn(
                async move {
                    match timeout(deadline, provider.search(&request, &child)).await {
                        Ok(result) => result,
                        Err(_) => {
                            child.cancel();
                            Err(ProviderError::timeout_with_duration(
                                format!("no answer within {}ms", deadline.as_millis()),
                                deadline.as_millis() as u64,
                            ))
                        }
                    }
                }
                .instrument(span),
            );

            names.push(name);
            handles.push(handle);
        }

        names
            .into_iter()
            .zip(join_all(handles).await)
            .map(|(provider, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    Err(ProviderError::internal(format!("provider task failed: {e}")))
                });
                match &result {
                    Ok(flights) => debug!(%provider, count = flights.len(), "Provider answered"),
                    Err(error) => warn!(%provider, %error, "Provider failed"),
                }
                ProviderOutcome { provider, result }
            })
            .collect()
    }
}
