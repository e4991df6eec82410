//! Expiry metadata stored alongside every element.

use std::time::{Duration, Instant};

/// The expiry marker of a single element.
///
/// A marker without an instant never expires. Markers are `Copy`, so
/// copying a set's storage shares them by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Marker {
    /// When the element expires. `None` means no expiration.
    expires_at: Option<Instant>,
}

impl Marker {
    /// A marker that never expires.
    pub fn never() -> Self {
        Self { expires_at: None }
    }

    /// A marker expiring `ttl` after `now`.
    ///
    /// A TTL past the platform's representable range saturates to the
    /// furthest instant that can be represented; it still expires.
    pub fn after(now: Instant, ttl: Duration) -> Self {
        let mut ttl = ttl;
        loop {
            if let Some(expires) = now.checked_add(ttl) {
                return Self {
                    expires_at: Some(expires),
                };
            }
            ttl /= 2;
        }
    }

    /// Check whether the element has expired at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Time left before expiry, measured from `now`.
    ///
    /// `None` for markers that never expire; `Some(Duration::ZERO)` once
    /// the marker has passed.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
