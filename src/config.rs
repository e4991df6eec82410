//! Configuration for the expirable set.
//!
//! This module provides a builder for the construction-time options of a
//! set: the advisory capacity hint and the clock used for expiry.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};

/// Smallest non-zero capacity hint a set records.
pub const MIN_CAPACITY: usize = 8;

/// Configuration for creating a new set.
///
/// Use the builder pattern to construct configuration:
///
/// ```
/// use expirable_set::SetConfig;
///
/// let config = SetConfig::new().capacity(10_000).build();
/// assert_eq!(config.get_capacity(), 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct SetConfig {
    /// Advisory size hint used to pre-size storage.
    /// `0` means default sizing.
    pub(crate) capacity: usize,

    /// Time source for stamping and checking expiry markers.
    pub(crate) clock: Arc<dyn Clock>,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            clock: Arc::new(SystemClock),
        }
    }
}

impl SetConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity hint.
    ///
    /// The hint only pre-sizes storage and never changes membership or
    /// expiry behavior. `0` keeps default sizing; any other value is
    /// rounded up to [`MIN_CAPACITY`].
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = normalize_capacity(capacity);
        self
    }

    /// Set the clock used for expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the recorded capacity hint.
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }
}

fn normalize_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        0
    } else {
        capacity.max(MIN_CAPACITY)
    }
}
