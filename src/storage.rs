//! Internal storage for the set.
//!
//! `Entries` is the unlocked element → marker mapping. It knows nothing
//! about guards or clocks; the owning `ExpirableSet` holds it behind a
//! read-write lock and passes in the instant to check expiry against.

use indexmap::IndexMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Instant;

use crate::entry::Marker;

/// Largest number of slots reserved up front from a capacity hint.
pub(crate) const MAX_PRESIZE: usize = 1 << 20;

/// The element → expiry marker mapping.
///
/// Removal uses `swap_remove`, so iteration order is not stable across
/// deletes. Nothing outside this crate observes the order.
#[derive(Debug, Clone)]
pub(crate) struct Entries<T> {
    map: IndexMap<T, Marker>,
}

impl<T> Entries<T> {
    /// Create empty storage pre-sized for up to `capacity` elements.
    ///
    /// The pre-size is capped at [`MAX_PRESIZE`], so an oversized hint
    /// never makes construction fail.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity.min(MAX_PRESIZE)),
        }
    }

    /// Number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterate over every stored entry, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &Marker)> {
        self.map.iter()
    }

    /// Iterate over every stored element, expired ones included.
    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }
}

impl<T: Eq + Hash> Entries<T> {
    /// Insert or overwrite the marker for `elem`.
    pub fn insert(&mut self, elem: T, marker: Marker) {
        self.map.insert(elem, marker);
    }

    pub fn get<Q>(&self, elem: &Q) -> Option<Marker>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(elem).copied()
    }

    /// Key presence, ignoring expiry.
    pub fn contains_key<Q>(&self, elem: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(elem)
    }

    pub fn remove<Q>(&mut self, elem: &Q) -> Option<Marker>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.swap_remove(elem)
    }

    /// Remove `elem` only if its marker has passed at `now`.
    ///
    /// Returns `true` if an entry was dropped.
    pub fn remove_if_expired<Q>(&mut self, elem: &Q, now: Instant) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(elem) {
            Some(marker) if marker.is_expired_at(now) => {
                self.map.swap_remove(elem);
                true
            }
            _ => false,
        }
    }

    /// Drop every entry expired at `now`, then call `visit` for each live one.
    ///
    /// `visit` only runs once the map is consistent again, so a panicking
    /// visitor cannot leave the storage half-rebuilt.
    ///
    /// Returns the number of entries dropped.
    pub fn sweep<F>(&mut self, now: Instant, mut visit: F) -> usize
    where
        F: FnMut(&T),
    {
        let before = self.map.len();
        self.map.retain(|_, marker| !marker.is_expired_at(now));
        let removed = before - self.map.len();

        for elem in self.map.keys() {
            visit(elem);
        }
        removed
    }

    /// Release spare storage, keeping room for at least `min_capacity`.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.map.shrink_to(min_capacity);
    }
}
