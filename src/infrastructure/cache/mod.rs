//! # Caching
//!
//! In-memory result caching.
//!
//! - [`TtlCache`]: generic store with per-entry expiry and clone isolation
//! - [`Clock`]: time source, swappable for deterministic tests
//!
//! ## Thread Safety
//!
//! [`TtlCache`] guards its map with a reader/writer lock: lookups of live
//! entries run concurrently, stores and evictions are exclusive.

pub mod clock;
pub mod ttl_cache;

#[cfg(any(test, feature = "test-helpers"))]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
pub use ttl_cache::TtlCache;
