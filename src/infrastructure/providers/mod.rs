//! # Flight Providers
//!
//! The provider port, its error taxonomy and the decorators wrapped around
//! concrete sources.
//!
//! - [`FlightProvider`]: the capability every source implements
//! - [`ProviderError`]: transient versus permanent failures
//! - [`RateLimitedProvider`]: per-instance minimum call spacing
//! - [`SimulatedProvider`]: in-memory source with random latency and failures
//! - [`RandomSource`]: injected randomness for simulated sources

pub mod error;
pub mod random;
pub mod rate_limit;
pub mod simulated;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use rate_limit::{RateLimitedProvider, RateLimiter};
pub use simulated::SimulatedProvider;
pub use traits::FlightProvider;
