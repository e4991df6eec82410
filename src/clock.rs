//! Time sources used to stamp and check expiry markers.
//!
//! Every set reads time through a [`Clock`] so that expiry can be driven
//! deterministically in tests with a [`ManualClock`].

use parking_lot::Mutex;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// A source of monotonic instants.
pub trait Clock: Send + Sync + Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock. This is the default for every set.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// ```
/// use expirable_set::{ExpirableSet, ManualClock, SetConfig};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(ManualClock::new());
/// let set = ExpirableSet::with_config(SetConfig::new().clock(clock.clone()).build());
///
/// set.add_with_expire("token", Duration::from_secs(30));
/// assert!(set.contains(&"token"));
///
/// clock.advance(Duration::from_secs(30));
/// assert!(!set.contains(&"token"));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock frozen at `origin`.
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }

    /// Total time the clock has been advanced since creation.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.now(), first);
    }

    #[test]
    fn test_manual_clock_advance() {
        let origin = Instant::now();
        let clock = ManualClock::starting_at(origin);

        clock.advance(Duration::from_secs(5));
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.now(), origin + Duration::from_millis(5500));
        assert_eq!(clock.elapsed(), Duration::from_millis(5500));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(1));
        assert!(clock.now() > first);
    }
}
