//! # Settings
//!
//! Runtime settings for the aggregator.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. an optional configuration file (any format the `config` crate reads)
//! 3. `FLIGHTS__*` environment variables, e.g. `FLIGHTS__CACHE_TTL_SECS=30`
//!
//! A `.env` file in the working directory is loaded first, if present.
//!
//! # Examples
//!
//! ```no_run
//! use flight_aggregator::infrastructure::config::AggregatorSettings;
//!
//! let settings = AggregatorSettings::load(None)?;
//! let config = settings.aggregation_config();
//! # Ok::<(), flight_aggregator::infrastructure::config::ConfigError>(())
//! ```

use crate::application::use_cases::AggregationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FLIGHTS";

/// Default minimum spacing between calls to one provider in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 100;

/// Error raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Aggregator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorSettings {
    /// Cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Per-provider deadline in milliseconds.
    pub provider_timeout_ms: u64,
    /// Retries after a transient failure.
    pub max_provider_retries: u32,
    /// Minimum spacing between calls to one provider in milliseconds.
    pub rate_limit_ms: u64,
    /// Overall request deadline in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        let defaults = AggregationConfig::default();
        Self {
            cache_ttl_secs: defaults.cache_ttl.as_secs(),
            provider_timeout_ms: defaults.per_provider_timeout_ms,
            max_provider_retries: defaults.max_retries,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            request_timeout_ms: defaults.request_timeout_ms,
        }
    }
}

impl AggregatorSettings {
    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a source cannot be parsed and
    /// [`ConfigError::Invalid`] if a deadline is zero.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a deadline is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "provider_timeout_ms must be positive".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the cache time-to-live.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Returns the minimum spacing between calls to one provider.
    #[must_use]
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Builds the use case configuration.
    #[must_use]
    pub fn aggregation_config(&self) -> AggregationConfig {
        AggregationConfig::default()
            .with_cache_ttl(self.cache_ttl())
            .with_per_provider_timeout(self.provider_timeout_ms)
            .with_max_retries(self.max_provider_retries)
            .with_request_timeout(self.request_timeout_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = AggregatorSettings::default();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.provider_timeout_ms, 1000);
        assert_eq!(settings.max_provider_retries, 2);
        assert_eq!(settings.rate_limit(), Duration::from_millis(100));
        assert_eq!(settings.request_timeout_ms, 5000);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = std::env::temp_dir().join(format!("flight-aggregator-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "cache_ttl_secs = 5\nrate_limit_ms = 0\n").unwrap();

        let settings = AggregatorSettings::load(Some(&path)).unwrap();

        assert_eq!(settings.cache_ttl_secs, 5);
        assert_eq!(settings.rate_limit_ms, 0);
        assert_eq!(
            settings.provider_timeout_ms,
            AggregationConfig::default().per_provider_timeout_ms
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn defaults_round_trip_through_aggregation_config() {
        assert_eq!(
            AggregatorSettings::default().aggregation_config(),
            AggregationConfig::default()
        );
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let settings = AggregatorSettings {
            provider_timeout_ms: 0,
            ..AggregatorSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn aggregation_config_carries_settings() {
        let settings = AggregatorSettings {
            cache_ttl_secs: 30,
            provider_timeout_ms: 750,
            max_provider_retries: 1,
            rate_limit_ms: 100,
            request_timeout_ms: 2000,
        };
        let config = settings.aggregation_config();
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.per_provider_timeout_ms, 750);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.request_timeout_ms, 2000);
    }
}
