//! Clock adapters for cache expiry.

use std::fmt;
use std::time::Instant;

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockClock;

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// System clock using `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
mod mock {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Manually advanced clock for tests.
    ///
    /// Clones share the same time value.
    #[derive(Debug, Clone)]
    pub struct MockClock {
        current: Arc<Mutex<Instant>>,
    }

    impl MockClock {
        /// Creates a clock frozen at the current instant.
        #[must_use]
        pub fn new() -> Self {
            Self {
                current: Arc::new(Mutex::new(Instant::now())),
            }
        }

        /// Moves the clock forward.
        pub fn advance(&self, by: Duration) {
            let mut current = self.current.lock();
            *current += by;
        }
    }

    impl Default for MockClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current.lock()
        }
    }
}
