//! The main set interface.
//!
//! This module provides `ExpirableSet`, the lock-guarded element store
//! with per-element expiry. Expired elements are never reported as
//! members; they are physically removed lazily, by whichever operation
//! next sweeps the set.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::SetConfig;
use crate::entry::Marker;
use crate::error::{SetError, SetResult};
use crate::stats::{SetStats, StatsSnapshot};
use crate::storage::Entries;

/// Source of per-instance identities. Binary operations lock two sets in
/// ascending identity order.
static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

/// Storage figures reported by [`ExpirableSet::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetInfo {
    /// Physically stored entries, including expired ones not yet swept.
    pub stored: usize,
    /// The advisory capacity hint recorded at construction.
    pub capacity: usize,
}

/// A thread-safe set whose elements may carry a time-to-live.
///
/// # Features
/// - **Thread-safe**: share with `Arc<ExpirableSet<T>>`; every method takes `&self`.
/// - **TTL support**: elements added with [`add_with_expire`](Self::add_with_expire)
///   stop being members once their TTL elapses.
/// - **Lazy expiry**: there is no background task. Expired entries are
///   invisible to readers and are deleted by the next sweeping operation
///   (`contains`, `get_all`, `size`, `for_each`, `compact`).
/// - **Set algebra**: union, intersection, symmetric difference, equality
///   and subset checks between two instances, safe under concurrent use.
///
/// Elements must not be mutated in a way that changes their `Hash` or
/// `Eq` once inserted.
///
/// # Example
/// ```
/// use expirable_set::ExpirableSet;
/// use std::time::Duration;
///
/// let set = ExpirableSet::new();
/// set.add("foo");
/// set.add("foo");
/// set.add_with_expire("bar", Duration::from_secs(60));
///
/// assert_eq!(set.size(), 2);
/// assert!(set.contains(&"bar"));
/// ```
#[derive(Debug)]
pub struct ExpirableSet<T> {
    /// Process-unique identity used for lock ordering.
    pub(crate) id: u64,

    /// The element store, protected by a read-write lock.
    pub(crate) entries: RwLock<Entries<T>>,

    /// Advisory capacity hint; immutable after construction.
    capacity: usize,

    clock: Arc<dyn Clock>,

    stats: SetStats,
}

impl<T> ExpirableSet<T> {
    /// Create an empty set with default sizing and the system clock.
    pub fn new() -> Self {
        Self::with_config(SetConfig::default())
    }

    /// Create an empty set with storage pre-sized from `capacity`.
    ///
    /// The hint never changes membership or expiry behavior.
    ///
    /// ```
    /// use expirable_set::ExpirableSet;
    ///
    /// let set: ExpirableSet<u64> = ExpirableSet::with_capacity(1_000);
    /// assert_eq!(set.capacity(), 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(SetConfig::new().capacity(capacity).build())
    }

    /// Create an empty set from a full configuration.
    pub fn with_config(config: SetConfig) -> Self {
        Self::from_parts(Entries::with_capacity(config.capacity), config.capacity, config.clock)
    }

    pub(crate) fn from_parts(entries: Entries<T>, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            entries: RwLock::new(entries),
            capacity,
            clock,
            stats: SetStats::new(),
        }
    }

    /// A new instance around `entries` that shares this set's capacity
    /// hint and clock, with its own identity and counters.
    pub(crate) fn derive(&self, entries: Entries<T>) -> Self {
        Self::from_parts(entries, self.capacity, Arc::clone(&self.clock))
    }

    /// The advisory capacity hint recorded at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Storage figures without sweeping.
    pub fn info(&self) -> SetInfo {
        SetInfo {
            stored: self.read().len(),
            capacity: self.capacity,
        }
    }

    /// Get a snapshot of the set statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Entries<T>> {
        self.entries.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries<T>> {
        self.entries.write()
    }
}

impl<T: Eq + Hash> ExpirableSet<T> {
    /// Add an element that never expires.
    ///
    /// If the element is already stored, any expiry it had is cleared.
    pub fn add(&self, elem: T) {
        self.insert(elem, Marker::never());
    }

    /// Add an element that expires `ttl` from now.
    ///
    /// If the element is already stored, its expiry is reset. A zero TTL
    /// stores an element that no later read will see.
    pub fn add_with_expire(&self, elem: T, ttl: Duration) {
        let marker = Marker::after(self.clock.now(), ttl);
        self.insert(elem, marker);
    }

    fn insert(&self, elem: T, marker: Marker) {
        self.write().insert(elem, marker);
        self.stats.record_insert();
    }

    /// Rename a stored element, keeping its expiry.
    ///
    /// The lookup ignores expiry: a stored but expired element is still
    /// renamed (and stays expired). An existing `new` entry is overwritten.
    ///
    /// # Errors
    /// Returns [`SetError::NotFound`] and leaves the set untouched if
    /// `old` is not stored.
    pub fn update<Q>(&self, old: &Q, new: T) -> SetResult<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.write();
        match entries.remove(old) {
            Some(marker) => {
                entries.insert(new, marker);
                self.stats.record_update();
                Ok(())
            }
            None => {
                debug!(set = self.id, "update of missing element");
                Err(SetError::NotFound)
            }
        }
    }

    /// Remove an element. Removing an absent element is a no-op.
    ///
    /// Returns `true` if an entry was stored, expired or not.
    pub fn remove<Q>(&self, elem: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let existed = self.write().remove(elem).is_some();
        if existed {
            self.stats.record_removal();
        }
        existed
    }

    /// Remove every element, resetting storage to the capacity hint.
    pub fn clear(&self) {
        *self.write() = Entries::with_capacity(self.capacity);
    }

    /// Check whether `elem` is a live member.
    ///
    /// A stored but expired element is reported absent and deleted.
    pub fn contains<Q>(&self, elem: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let marker = self.read().get(elem);

        match marker {
            Some(marker) if !marker.is_expired_at(now) => {
                self.stats.record_hit();
                true
            }
            Some(_) => {
                // Stale entry: the delete needs the exclusive lock, and
                // the entry may have been replaced since the read.
                if self.write().remove_if_expired(elem, now) {
                    self.stats.record_expirations(1);
                    trace!(set = self.id, "dropped expired element on lookup");
                }
                self.stats.record_miss();
                false
            }
            None => {
                self.stats.record_miss();
                false
            }
        }
    }

    /// Remaining time before `elem` expires.
    ///
    /// This is a pure read: an expired entry is reported as missing but
    /// is not deleted.
    ///
    /// # Errors
    /// - [`SetError::ElementNotFound`] if `elem` is absent or expired.
    /// - [`SetError::NoExpiry`] if `elem` is a member without a TTL.
    pub fn get_elem_ttl<Q>(&self, elem: &Q) -> SetResult<Duration>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let marker = self.read().get(elem).ok_or(SetError::ElementNotFound)?;
        let now = self.clock.now();

        if marker.is_expired_at(now) {
            return Err(SetError::ElementNotFound);
        }
        marker.remaining_at(now).ok_or(SetError::NoExpiry)
    }

    /// Number of live members. Sweeps expired entries first.
    pub fn size(&self) -> usize {
        let mut entries = self.write();
        self.sweep(&mut entries, |_| {});
        entries.len()
    }

    /// `true` if the set has no live members. Sweeps expired entries first.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Call `handler` once for each live member, in unspecified order,
    /// sweeping expired entries along the way.
    ///
    /// The set's exclusive lock is held for the whole traversal: the
    /// handler must not call back into the same set, or it will deadlock.
    pub fn for_each<F>(&self, handler: F)
    where
        F: FnMut(&T),
    {
        let mut entries = self.write();
        self.sweep(&mut entries, handler);
    }

    /// Sweep expired entries and release the storage left behind by
    /// removed elements, keeping room for at least the capacity hint.
    pub fn compact(&self) {
        let mut entries = self.write();
        self.sweep(&mut entries, |_| {});
        let keep = entries.len().max(self.capacity);
        entries.shrink_to(keep);
        debug!(set = self.id, stored = entries.len(), "compacted storage");
    }

    fn sweep<F>(&self, entries: &mut Entries<T>, visit: F)
    where
        F: FnMut(&T),
    {
        let removed = entries.sweep(self.clock.now(), visit);
        if removed > 0 {
            self.stats.record_expirations(removed);
            trace!(set = self.id, removed, "swept expired elements");
        }
    }
}

impl<T: Eq + Hash + Clone> ExpirableSet<T> {
    /// All live members, in unspecified order. Sweeps expired entries.
    pub fn get_all(&self) -> Vec<T> {
        let mut entries = self.write();
        let mut live = Vec::with_capacity(entries.len());
        self.sweep(&mut entries, |elem| live.push(elem.clone()));
        live
    }
}

impl<T> Default for ExpirableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A copy with its own storage: later writes to either set are not seen
/// by the other. Expiry markers are copied as-is, so expired entries stay
/// expired in the copy.
impl<T: Clone> Clone for ExpirableSet<T> {
    fn clone(&self) -> Self {
        let entries = self.read().clone();
        self.derive(entries)
    }
}

impl<T: Eq + Hash> FromIterator<T> for ExpirableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Adds every element without expiry.
impl<T: Eq + Hash> Extend<T> for ExpirableSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let entries = self.entries.get_mut();
        for elem in iter {
            entries.insert(elem, Marker::never());
            self.stats.record_insert();
        }
    }
}
