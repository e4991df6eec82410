//! Set algebra between two instances.
//!
//! Every binary operation works on key presence: expiry markers travel
//! with their elements but are not consulted, so an expired-but-unswept
//! element still takes part. Filtering expired elements is left to the
//! sweeping reads (`contains`, `get_all`, `for_each`).
//!
//! Both operands are locked for the duration of an operation, always in
//! ascending instance-id order, so `a.union(&b)` racing `b.union(&a)`
//! cannot deadlock. Results are new instances; neither operand is mutated.

use parking_lot::RwLockReadGuard;
use std::hash::Hash;
use std::sync::Arc;

use crate::set::ExpirableSet;
use crate::storage::Entries;

/// Read guards over one or two sets, taken in lock order.
enum Guards<'a, T> {
    /// Both operands are the same instance; its lock is taken once.
    Same(RwLockReadGuard<'a, Entries<T>>),
    Pair {
        this: RwLockReadGuard<'a, Entries<T>>,
        other: RwLockReadGuard<'a, Entries<T>>,
    },
}

impl<'a, T> Guards<'a, T> {
    fn acquire(this: &'a ExpirableSet<T>, other: &'a ExpirableSet<T>) -> Self {
        if std::ptr::eq(this, other) {
            return Guards::Same(this.read());
        }

        if this.id < other.id {
            let this_guard = this.read();
            let other_guard = other.read();
            Guards::Pair {
                this: this_guard,
                other: other_guard,
            }
        } else {
            let other_guard = other.read();
            let this_guard = this.read();
            Guards::Pair {
                this: this_guard,
                other: other_guard,
            }
        }
    }

    /// `(this, other)` views of the locked storage.
    fn views(&self) -> (&Entries<T>, &Entries<T>) {
        match self {
            Guards::Same(entries) => (&**entries, &**entries),
            Guards::Pair { this, other } => (&**this, &**other),
        }
    }
}

impl<T: Eq + Hash + Clone> ExpirableSet<T> {
    /// Pick the operand to copy. Ties go to `other`.
    fn larger_first<'s>(
        &'s self,
        other: &'s Self,
        this_entries: &'s Entries<T>,
        other_entries: &'s Entries<T>,
    ) -> (&'s Self, &'s Entries<T>, &'s Entries<T>) {
        if this_entries.len() > other_entries.len() {
            (self, this_entries, other_entries)
        } else {
            (other, other_entries, this_entries)
        }
    }

    /// Every element stored in either set.
    ///
    /// The result is a copy of the larger operand, extended with the
    /// smaller operand's elements it lacks. Markers are carried over.
    ///
    /// ```
    /// use expirable_set::ExpirableSet;
    ///
    /// let a: ExpirableSet<_> = ["x", "y"].into_iter().collect();
    /// let b: ExpirableSet<_> = ["y", "z"].into_iter().collect();
    ///
    /// let mut all = a.union(&b).get_all();
    /// all.sort();
    /// assert_eq!(all, vec!["x", "y", "z"]);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        let guards = Guards::acquire(self, other);
        let (this_entries, other_entries) = guards.views();
        let (owner, larger, smaller) = self.larger_first(other, this_entries, other_entries);

        let mut merged = larger.clone();
        for (elem, marker) in smaller.iter() {
            if !merged.contains_key(elem) {
                merged.insert(elem.clone(), *marker);
            }
        }
        owner.derive(merged)
    }

    /// Elements stored in both sets, in a freshly built set.
    ///
    /// Each element keeps the smaller operand's marker.
    pub fn intersect(&self, other: &Self) -> Self {
        let guards = Guards::acquire(self, other);
        let (this_entries, other_entries) = guards.views();
        let (_, larger, smaller) = self.larger_first(other, this_entries, other_entries);

        let mut common = Entries::with_capacity(0);
        for (elem, marker) in smaller.iter() {
            if larger.contains_key(elem) {
                common.insert(elem.clone(), *marker);
            }
        }
        ExpirableSet::from_parts(common, 0, Arc::clone(self.clock()))
    }

    /// Symmetric difference: elements stored in exactly one of the sets.
    ///
    /// The result is a copy of the larger operand with the shared
    /// elements removed and the smaller operand's own elements added.
    pub fn different(&self, other: &Self) -> Self {
        let guards = Guards::acquire(self, other);
        let (this_entries, other_entries) = guards.views();
        let (owner, larger, smaller) = self.larger_first(other, this_entries, other_entries);

        let mut result = larger.clone();
        for (elem, marker) in smaller.iter() {
            if result.remove(elem).is_none() {
                result.insert(elem.clone(), *marker);
            }
        }
        owner.derive(result)
    }
}

impl<T: Eq + Hash> ExpirableSet<T> {
    /// `true` if both sets store exactly the same elements, in any order.
    pub fn equal(&self, other: &Self) -> bool {
        let guards = Guards::acquire(self, other);
        let (this_entries, other_entries) = guards.views();

        let equal = this_entries.len() == other_entries.len()
            && other_entries.keys().all(|elem| this_entries.contains_key(elem));
        equal
    }

    /// `true` if every element stored here is also stored in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let guards = Guards::acquire(self, other);
        let (this_entries, other_entries) = guards.views();

        if this_entries.len() > other_entries.len() {
            return false;
        }
        let subset = this_entries.keys().all(|elem| other_entries.contains_key(elem));
        subset
    }
}

impl<T: Eq + Hash> PartialEq for ExpirableSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}
