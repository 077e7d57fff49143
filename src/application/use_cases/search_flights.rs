//! # Search Flights Use Case
//!
//! Aggregated flight search across every registered provider.
//!
//! A call first consults the result cache. On a miss the outbound leg is
//! fanned out and processed, then the return leg if the criteria ask for a
//! round trip. The assembled outcome is cached before it is returned.
//!
//! Individual provider failures do not fail the call; they are counted in
//! [`SearchMetadata`]. Only caller cancellation and the overall request
//! deadline surface as errors.
//!
//! # Examples
//!
//! ```ignore
//! let use_case = SearchFlights::with_defaults(providers);
//! let outcome = use_case.search(&criteria).await?;
//! ```

use crate::application::dto::{CriteriaEcho, SearchMetadata, SearchOutcome};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::fan_out::{DEFAULT_PER_PROVIDER_TIMEOUT_MS, FanOutOrchestrator};
use crate::application::services::flight_filter::LegContext;
use crate::application::services::pipeline::process_leg;
use crate::application::services::ranking_strategy::{BestValueStrategy, RankingStrategy};
use crate::application::services::retry::{DEFAULT_MAX_RETRIES, RetryPolicy};
use crate::application::use_cases::cache_key::cache_key;
use crate::domain::entities::Flight;
use crate::domain::value_objects::{FilterSet, SearchCriteria, SearchRequest};
use crate::infrastructure::cache::TtlCache;
use crate::infrastructure::providers::FlightProvider;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default cache time-to-live in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default overall request deadline in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Configuration for aggregated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Time-to-live of cached outcomes.
    pub cache_ttl: Duration,
    /// Per-provider deadline in milliseconds.
    pub per_provider_timeout_ms: u64,
    /// Retries after a transient provider failure.
    pub max_retries: u32,
    /// Overall deadline of one search call in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            per_provider_timeout_ms: DEFAULT_PER_PROVIDER_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AggregationConfig {
    /// Sets the cache time-to-live.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the per-provider deadline.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = timeout_ms;
        self
    }

    /// Sets the retry limit.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the overall request deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }
}

/// Providers that answered on one leg.
#[derive(Debug, Default)]
struct LegStats {
    succeeded: BTreeSet<String>,
}

/// Ranked records and provider statistics of one leg.
#[derive(Debug)]
struct LegResult {
    flights: Vec<Flight>,
    stats: LegStats,
}

/// Aggregated flight search.
#[derive(Debug)]
pub struct SearchFlights {
    fan_out: FanOutOrchestrator,
    provider_names: Vec<String>,
    cache: Arc<TtlCache<SearchOutcome>>,
    ranking: Arc<dyn RankingStrategy>,
    config: AggregationConfig,
}

impl SearchFlights {
    /// Creates the use case.
    ///
    /// `providers` are queried in registration order; that order is also
    /// the order of failed provider names in the metadata.
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn FlightProvider>>,
        cache: Arc<TtlCache<SearchOutcome>>,
        ranking: Arc<dyn RankingStrategy>,
        config: AggregationConfig,
    ) -> Self {
        let fan_out = FanOutOrchestrator::new(
            providers,
            RetryPolicy::new(config.max_retries),
            Duration::from_millis(config.per_provider_timeout_ms),
        );
        let provider_names = fan_out.provider_names();
        Self {
            fan_out,
            provider_names,
            cache,
            ranking,
            config,
        }
    }

    /// Creates the use case with a fresh cache, best-value ranking and the
    /// default configuration.
    #[must_use]
    pub fn with_defaults(providers: Vec<Arc<dyn FlightProvider>>) -> Self {
        Self::new(
            providers,
            Arc::new(TtlCache::new(SearchOutcome::clone)),
            Arc::new(BestValueStrategy::default()),
            AggregationConfig::default(),
        )
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking.name()
    }

    /// Runs a search that can only stop early on the request deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Timeout`] if the request deadline elapses.
    pub async fn search(&self, criteria: &SearchCriteria) -> ApplicationResult<SearchOutcome> {
        self.search_with_cancellation(criteria, &CancellationToken::new())
            .await
    }

    /// Runs a search under the caller's cancellation token.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Cancelled`] if `cancel` fires before the
    /// outcome is assembled and [`ApplicationError::Timeout`] if the request
    /// deadline elapses first.
    pub async fn search_with_cancellation(
        &self,
        criteria: &SearchCriteria,
        cancel: &CancellationToken,
    ) -> ApplicationResult<SearchOutcome> {
        let started = Instant::now();
        if cancel.is_cancelled() {
            return Err(ApplicationError::cancelled());
        }

        let key = cache_key(criteria);
        if let Some(mut cached) = self.cache.get(&key) {
            cached.metadata.cache_hit = true;
            cached.metadata.search_time_ms = elapsed_ms(started);
            info!(
                origin = criteria.origin(),
                destination = criteria.destination(),
                cache_hit = true,
                total_results = cached.metadata.total_results,
                elapsed_ms = cached.metadata.search_time_ms,
                "Search served from cache"
            );
            return Ok(cached);
        }
        debug!(%key, "Cache miss");

        // Cancelled on every exit so that abandoned provider tasks stop.
        let scope = cancel.child_token();
        let _scope_guard = scope.clone().drop_guard();

        let deadline = Duration::from_millis(self.config.request_timeout_ms);
        let (outbound, inbound) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApplicationError::cancelled()),
            legs = timeout(deadline, self.run_legs(criteria, &scope)) => match legs {
                Ok(legs) => legs,
                Err(_) => return Err(ApplicationError::timeout(self.config.request_timeout_ms)),
            },
        };

        let metadata = self.assemble_metadata(&outbound, inbound.as_ref(), started);
        let outcome = SearchOutcome {
            criteria: CriteriaEcho::from(criteria),
            metadata,
            flights: outbound.flights,
            return_flights: inbound.map(|leg| leg.flights).unwrap_or_default(),
        };

        self.cache.set(key, &outcome, self.config.cache_ttl);

        info!(
            origin = criteria.origin(),
            destination = criteria.destination(),
            cache_hit = false,
            total_results = outcome.metadata.total_results,
            providers_succeeded = outcome.metadata.providers_succeeded,
            providers_failed = outcome.metadata.providers_failed,
            elapsed_ms = outcome.metadata.search_time_ms,
            "Search completed"
        );
        Ok(outcome)
    }

    async fn run_legs(
        &self,
        criteria: &SearchCriteria,
        scope: &CancellationToken,
    ) -> (LegResult, Option<LegResult>) {
        let outbound = self
            .run_leg(criteria.outbound_request(), criteria.filters(), criteria, scope)
            .await;

        let inbound = match criteria.return_request() {
            Some(request) => {
                let filters = criteria.filters().reanchored_on(request.date);
                Some(self.run_leg(request, &filters, criteria, scope).await)
            }
            None => None,
        };

        (outbound, inbound)
    }

    async fn run_leg(
        &self,
        request: SearchRequest,
        filters: &FilterSet,
        criteria: &SearchCriteria,
        scope: &CancellationToken,
    ) -> LegResult {
        let outcomes = self.fan_out.search_all(&request, scope).await;

        let mut stats = LegStats::default();
        let mut raw = Vec::new();
        for outcome in outcomes {
            if let Ok(flights) = outcome.result {
                stats.succeeded.insert(outcome.provider);
                raw.extend(flights);
            }
        }

        let leg = LegContext::new(
            request.origin,
            request.destination,
            request.date,
            request.cabin_class,
        );
        let flights = process_leg(raw, &leg, filters, self.ranking.as_ref(), criteria.sort());
        LegResult { flights, stats }
    }

    fn assemble_metadata(
        &self,
        outbound: &LegResult,
        inbound: Option<&LegResult>,
        started: Instant,
    ) -> SearchMetadata {
        let succeeded = |name: &str| {
            outbound.stats.succeeded.contains(name)
                || inbound.is_some_and(|leg| leg.stats.succeeded.contains(name))
        };
        let failed_providers: Vec<String> = self
            .provider_names
            .iter()
            .filter(|name| !succeeded(name.as_str()))
            .cloned()
            .collect();

        let providers_queried = self.provider_names.len();
        let providers_succeeded = providers_queried - failed_providers.len();
        SearchMetadata {
            total_results: outbound.flights.len() + inbound.map_or(0, |leg| leg.flights.len()),
            providers_queried,
            providers_succeeded,
            providers_failed: failed_providers.len(),
            search_time_ms: elapsed_ms(started),
            cache_hit: false,
            failed_providers,
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
