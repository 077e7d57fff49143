//! # TTL Cache
//!
//! Generic in-memory cache with per-entry expiry.
//!
//! Values are copied through a clone function supplied at construction, both
//! when stored and when read, so neither the caller nor the cache can observe
//! the other's later mutations. Expired entries are evicted lazily on lookup;
//! there is no background sweeper. A TTL too large to represent as an
//! instant never expires.
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::infrastructure::cache::TtlCache;
//! use std::time::Duration;
//!
//! let cache: TtlCache<Vec<u32>> = TtlCache::new(Vec::clone);
//! cache.set("k", &vec![1, 2, 3], Duration::from_secs(60));
//!
//! let mut copy = cache.get("k").unwrap();
//! copy.push(4);
//! assert_eq!(cache.get("k").unwrap(), vec![1, 2, 3]);
//! ```

use crate::infrastructure::cache::clock::{Clock, SystemClock};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

type CloneFn<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

struct CacheEntry<T> {
    value: T,
    /// `None` when the TTL overflows the clock.
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Key/value store with per-entry time-to-live.
pub struct TtlCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    clone: CloneFn<T>,
    clock: Arc<dyn Clock>,
}

impl<T> TtlCache<T> {
    /// Creates an empty cache using the system clock.
    #[must_use]
    pub fn new<F>(clone: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        Self::with_clock(clone, Arc::new(SystemClock))
    }

    /// Creates an empty cache driven by `clock`.
    #[must_use]
    pub fn with_clock<F>(clone: F, clock: Arc<dyn Clock>) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        Self {
            entries: RwLock::new(HashMap::new()),
            clone: Arc::new(clone),
            clock,
        }
    }

    /// Returns a copy of the live value stored under `key`.
    ///
    /// An entry whose expiry is at or before now is removed and reported as
    /// missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.is_live(now) => return Some((self.clone)(&entry.value)),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        // Re-check: a writer may have refreshed the entry in between.
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        None
    }

    /// Stores a copy of `value` under `key` for `ttl`.
    pub fn set(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        let entry = CacheEntry {
            value: (self.clone)(value),
            expires_at: self.clock.now().checked_add(ttl),
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Removes the entry under `key`, returning true if one existed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of stored entries, including expired ones not yet
    /// evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::clock::MockClock;

    fn cache_with_clock() -> (TtlCache<Vec<String>>, MockClock) {
        let clock = MockClock::new();
        let cache = TtlCache::with_clock(Vec::clone, Arc::new(clock.clone()));
        (cache, clock)
    }

    #[test]
    fn get_immediately_after_set_hits() {
        let (cache, _clock) = cache_with_clock();
        cache.set("k", &vec!["a".to_string()], Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn missing_key_misses() {
        let (cache, _clock) = cache_with_clock();
        assert!(cache.get("absent").is_none());
    }

    #[test]
    fn entry_expires_at_ttl_and_is_evicted() {
        let (cache, clock) = cache_with_clock();
        cache.set("k", &vec!["a".to_string()], Duration::from_secs(60));

        clock.advance(Duration::from_secs(59));
        assert!(cache.get("k").is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_never_hits() {
        let (cache, _clock) = cache_with_clock();
        cache.set("k", &vec![], Duration::ZERO);
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn unrepresentable_ttl_never_expires() {
        let (cache, clock) = cache_with_clock();
        cache.set("max", &vec!["a".to_string()], Duration::MAX);
        cache.set("secs", &vec!["b".to_string()], Duration::from_secs(u64::MAX));

        clock.advance(Duration::from_secs(10 * 365 * 24 * 3600));

        assert_eq!(cache.get("max"), Some(vec!["a".to_string()]));
        assert_eq!(cache.get("secs"), Some(vec!["b".to_string()]));
    }

    #[test]
    fn mutating_read_copy_does_not_affect_cache() {
        let (cache, _clock) = cache_with_clock();
        cache.set("k", &vec!["a".to_string()], Duration::from_secs(60));

        let mut copy = cache.get("k").unwrap();
        copy.push("mutated".to_string());

        assert_eq!(cache.get("k").unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn mutating_original_after_set_does_not_affect_cache() {
        let (cache, _clock) = cache_with_clock();
        let mut original = vec!["a".to_string()];
        cache.set("k", &original, Duration::from_secs(60));

        original.clear();

        assert_eq!(cache.get("k").unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn set_overwrites_and_refreshes_expiry() {
        let (cache, clock) = cache_with_clock();
        cache.set("k", &vec!["old".to_string()], Duration::from_secs(10));
        clock.advance(Duration::from_secs(8));
        cache.set("k", &vec!["new".to_string()], Duration::from_secs(10));
        clock.advance(Duration::from_secs(8));

        assert_eq!(cache.get("k").unwrap(), vec!["new".to_string()]);
    }

    #[test]
    fn remove_and_clear() {
        let (cache, _clock) = cache_with_clock();
        cache.set("a", &vec![], Duration::from_secs(60));
        cache.set("b", &vec![], Duration::from_secs(60));

        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let cache = Arc::new(TtlCache::new(|v: &u64| *v));
        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for j in 0..100u64 {
                        cache.set(format!("k{}", i), &j, Duration::from_secs(60));
                        let _ = cache.get(&format!("k{}", (i + 1) % 8));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for i in 0..8u64 {
            assert_eq!(cache.get(&format!("k{}", i)), Some(99));
        }
    }
}
