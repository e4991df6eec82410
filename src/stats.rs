//! Statistics for set operations.
//!
//! This module provides atomic counters for tracking membership checks,
//! writes and lazy expiry sweeps without taking the set's lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for set operations.
///
/// All counters are atomic and can be safely accessed from multiple threads.
/// Use `ExpirableSet::stats()` to get a snapshot of the current statistics.
#[derive(Debug, Default)]
pub struct SetStats {
    /// `contains` calls that found a live element.
    hits: AtomicU64,

    /// `contains` calls that found nothing, or only an expired entry.
    misses: AtomicU64,

    /// Elements written by `add` or `add_with_expire`.
    inserts: AtomicU64,

    /// Successful renames through `update`.
    updates: AtomicU64,

    /// Entries removed through `remove`.
    removals: AtomicU64,

    /// Entries deleted by a sweep after their marker passed.
    expirations: AtomicU64,
}

impl SetStats {
    /// Create a new stats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` entries dropped by a sweep.
    pub fn record_expirations(&self, count: usize) {
        if count > 0 {
            self.expirations.fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub fn removals(&self) -> u64 {
        self.removals.load(Ordering::Relaxed)
    }

    pub fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }

    /// Calculate the hit rate as a percentage (0.0 to 100.0).
    /// Returns 0.0 if `contains` has never been called.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Create a snapshot of the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            inserts: self.inserts(),
            updates: self.updates(),
            removals: self.removals(),
            expirations: self.expirations(),
            hit_rate: self.hit_rate(),
        }
    }
}

/// A point-in-time snapshot of set statistics.
///
/// Unlike `SetStats`, this struct contains plain values (not atomics)
/// and can be easily logged or compared.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removals: u64,
    pub expirations: u64,
    pub hit_rate: f64,
}
