//! Sorted set of unique values stored in contiguous memory.
//!
//! This module provides [`FlatSet`], a set that keeps its values in a single
//! sorted `Vec` ordered by a caller-supplied [`Compare`].
//!
//! # Time Complexity
//!
//! | Operation                | Complexity                         |
//! |--------------------------|------------------------------------|
//! | `find`, `contains`       | O(log n)                           |
//! | `lower_bound`            | O(log n)                           |
//! | `insert`, `remove`       | O(log n) search + O(n) shift       |
//! | `replace`                | O(1)                               |
//! | `merge`                  | O(n + m), plus O(m log m) re-sort  |
//! | `update`, `union`        | O(m log k) search + shifts         |
//! | `intersection`           | O(n + m log k)                     |
//! | `difference`             | O(n + m log k) search + shifts     |
//!
//! `k` is the distance between consecutive query values in sort order, so
//! sorted input is considerably cheaper than `m` separate searches.
//!
//! # Examples
//!
//! ```rust
//! use flatset::{FlatSet, Natural};
//!
//! let mut set = FlatSet::new(Natural);
//! assert_eq!(set.insert(2), (0, true));
//! assert_eq!(set.insert(3), (1, true));
//! assert_eq!(set.insert(2), (0, false));
//! assert_eq!(set.insert(1), (0, true));
//!
//! assert_eq!(set.find(&3), Some(2));
//! assert_eq!(set.find(&4), None);
//!
//! let union = set.union([0, 5]);
//! assert_eq!(union.as_slice(), &[0, 1, 2, 3, 5]);
//! assert_eq!(set.len(), 3);
//! ```
//!
//! Conversions through `From`/`collect` need the comparator named, usually via
//! the `Natural` default:
//!
//! ```rust
//! use flatset::FlatSet;
//!
//! let set: FlatSet<i32> = FlatSet::from(vec![3, 1, 3, 2]);
//! assert_eq!(set.as_slice(), &[1, 2, 3]);
//! ```

use crate::compare::{Compare, Natural};

use super::error::OrderError;
use super::storage::{self, Bound, Storage};
use super::traversal::Traversal;

/// A sorted associative container of unique values.
///
/// No two stored values are equivalent under the comparator. When an
/// equivalent value is inserted, the stored one is kept and the newcomer is
/// dropped, so a value's identity is stable for as long as it is stored.
///
/// # Type Parameters
///
/// * `T` - The element type.
/// * `C` - The comparator, a strict weak ordering over `T`. Defaults to
///   [`Natural`].
///
/// # Examples
///
/// ```rust
/// use flatset::FlatSet;
///
/// // Oldest first, then by name.
/// let by_age = |left: &(u32, &str), right: &(u32, &str)| {
///     left.0 > right.0 || (left.0 == right.0 && left.1 < right.1)
/// };
/// let members: FlatSet<(u32, &str), _> =
///     FlatSet::from_vec(vec![(80, "Mick"), (81, "Brian"), (80, "Keith")], by_age);
///
/// let names: Vec<&str> = members.iter().map(|member| member.1).collect();
/// assert_eq!(names, vec!["Brian", "Keith", "Mick"]);
/// ```
#[derive(Clone)]
pub struct FlatSet<T, C = Natural> {
    storage: Storage<T, C>,
}

impl<T, C: Compare<T>> FlatSet<T, C> {
    /// Creates an empty set ordered by `compare`.
    #[inline]
    #[must_use]
    pub const fn new(compare: C) -> Self {
        Self {
            storage: Storage::new(compare),
        }
    }

    /// Creates an empty set with room for `capacity` values.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            storage: Storage {
                data: Vec::with_capacity(capacity),
                compare,
            },
        }
    }

    /// Creates a set from arbitrary values.
    ///
    /// The values are sorted stably; of several equivalent values, the one
    /// appearing first in `values` is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::FlatSet;
    ///
    /// let by_key = |left: &(i32, char), right: &(i32, char)| left.0 < right.0;
    /// let set = FlatSet::from_vec(vec![(4, 'a'), (2, 'b'), (4, 'c'), (1, 'f')], by_key);
    /// assert_eq!(set.as_slice(), &[(1, 'f'), (2, 'b'), (4, 'a')]);
    /// ```
    #[must_use]
    pub fn from_vec(values: Vec<T>, compare: C) -> Self {
        let mut storage = Storage::from_unsorted(values, compare);
        storage.dedup();
        Self { storage }
    }

    /// Creates a set from arbitrary values, sorting large inputs in parallel.
    ///
    /// Same result as [`FlatSet::from_vec`].
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn par_from_vec(values: Vec<T>, compare: C) -> Self
    where
        T: Send,
        C: Sync,
    {
        let mut storage = Storage::par_from_unsorted(values, compare);
        storage.dedup();
        Self { storage }
    }

    /// Creates a set from values that are already strictly increasing under
    /// `compare`, without sorting them.
    ///
    /// # Preconditions
    ///
    /// `values` must be sorted with no two equivalent neighbours. In debug
    /// builds this is checked with `debug_assert!`; in release builds invalid
    /// input yields an unspecified order (a logic error, not memory
    /// unsafety). Use [`FlatSet::try_from_sorted_vec`] for a checked version.
    #[must_use]
    pub fn from_sorted_vec(values: Vec<T>, compare: C) -> Self {
        debug_assert!(
            storage::check_sorted(&values, &compare, true).is_ok(),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self {
            storage: Storage {
                data: values,
                compare,
            },
        }
    }

    /// Creates a set from values that should already be strictly increasing
    /// under `compare`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OutOfOrder`] or [`OrderError::Duplicate`] with the
    /// index of the first offending value.
    pub fn try_from_sorted_vec(values: Vec<T>, compare: C) -> Result<Self, OrderError> {
        Storage::from_sorted(values, compare, true).map(|storage| Self { storage })
    }

    /// Returns the index of the value equivalent to `value`, or `None`.
    #[inline]
    #[must_use]
    pub fn find(&self, value: &T) -> Option<usize> {
        let index = self.storage.lower_bound(value);
        self.storage.matches_at(index, value).then_some(index)
    }

    /// Inserts `value` unless an equivalent value is already stored.
    ///
    /// Returns the index of the value now representing `value` and whether it
    /// was inserted. When an equivalent value exists, `value` is dropped and
    /// the existing index is returned with `false`. A successful insert
    /// invalidates previously obtained indices.
    #[inline]
    pub fn insert(&mut self, value: T) -> (usize, bool) {
        let index = self.storage.upper_bound(&value);
        if index > 0 && !self.storage.compare.less(&self.storage.data[index - 1], &value) {
            (index - 1, false)
        } else {
            self.storage.insert_at(index, value);
            (index, true)
        }
    }

    /// Removes and returns the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn erase(&mut self, index: usize) -> T {
        self.storage.data.remove(index)
    }

    /// Removes the value equivalent to `value`, returning whether one was
    /// found.
    pub fn remove(&mut self, value: &T) -> bool {
        self.find(value).map(|index| self.erase(index)).is_some()
    }

    /// Overwrites the value at `index` if `value` keeps the set strictly
    /// ordered against both neighbours.
    ///
    /// Returns `false`, leaving the set untouched, if `index` is out of bounds
    /// or `value` would be ordered before (or be equivalent to) its left
    /// neighbour, or after (or equivalent to) its right neighbour. No other
    /// value moves, so previously obtained indices stay valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::{FlatSet, Natural};
    ///
    /// let mut set = FlatSet::from_vec(vec![1, 3, 5], Natural);
    /// assert!(set.replace(1, 4));
    /// assert!(!set.replace(1, 5));
    /// assert!(!set.replace(7, 9));
    /// assert_eq!(set.as_slice(), &[1, 4, 5]);
    /// ```
    pub fn replace(&mut self, index: usize, value: T) -> bool {
        let data = &self.storage.data;
        let compare = &self.storage.compare;
        if index >= data.len()
            || (index > 0 && !compare.less(&data[index - 1], &value))
            || (index + 1 < data.len() && !compare.less(&value, &data[index + 1]))
        {
            return false;
        }
        self.storage.data[index] = value;
        true
    }

    /// Moves every value of `other` into this set.
    ///
    /// Values equivalent to one already stored are dropped. If the two
    /// comparators are not known to order identically (see
    /// [`Compare::same_ordering`]), the values of `other` are re-sorted under
    /// this set's comparator first. More efficient than
    /// [`update`](Self::update) since the result is allocated once.
    pub fn merge(&mut self, other: Self) {
        let presorted = self.storage.compare.same_ordering(&other.storage.compare);
        self.merge_values(other.storage.data, presorted);
    }

    /// Like [`merge`](Self::merge), with the caller asserting that `other` is
    /// ordered by an equivalent comparator, so no re-sort is done.
    ///
    /// In debug builds the assertion is checked.
    pub fn merge_presorted(&mut self, other: Self) {
        debug_assert!(
            storage::check_sorted(&other.storage.data, &self.storage.compare, false).is_ok(),
            "merge_presorted requires input ordered by an equivalent comparator"
        );
        self.merge_values(other.storage.data, true);
    }

    /// Moves every value of a set ordered by a different comparator type into
    /// this set. The incoming values are always re-sorted.
    pub fn merge_from<D: Compare<T>>(&mut self, other: FlatSet<T, D>) {
        self.merge_values(other.storage.data, false);
    }

    fn merge_values(&mut self, mut incoming: Vec<T>, presorted: bool) {
        let incoming_len = incoming.len();
        if !presorted {
            storage::stable_sort(&mut incoming, &self.storage.compare);
        }
        let before = self.storage.len();
        self.storage.merge_sorted(incoming);
        self.storage.dedup();
        tracing::debug!(
            existing = before,
            incoming = incoming_len,
            resorted = !presorted,
            merged = self.storage.len(),
            "merged flat set"
        );
    }

    /// Inserts each of `values` that has no equivalent already stored.
    ///
    /// Existing values win over incoming ones. Equivalent to calling
    /// [`insert`](Self::insert) for each value, but each search starts from
    /// where the previous value landed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::{FlatSet, Natural};
    ///
    /// let mut set = FlatSet::from_vec(vec![10, 20, 30], Natural);
    /// set.update([25, 20, 5, 35, 25]);
    /// assert_eq!(set.as_slice(), &[5, 10, 20, 25, 30, 35]);
    /// ```
    pub fn update<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut traversal = Traversal::new(values.into_iter(), Bound::Upper);
        let mut queried = 0_usize;
        let mut inserted = 0_usize;
        while let Some((index, value)) = traversal.step(&self.storage) {
            queried += 1;
            if index == 0 || self.storage.compare.less(&self.storage.data[index - 1], &value) {
                self.storage.insert_at(index, value);
                inserted += 1;
            }
        }
        tracing::trace!(queried, inserted, "updated flat set");
    }

    /// Returns a new set holding this set's values plus each of `values`
    /// without an equivalent among them.
    ///
    /// This set is not modified.
    #[must_use]
    pub fn union<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
        C: Clone,
    {
        let mut union = self.clone();
        union.update(values);
        union
    }

    /// Returns a new set holding the stored values that have an equivalent
    /// among `values`.
    ///
    /// The values kept are this set's own, not the queried ones. With a
    /// comparator that only looks at part of a value (a key), a match returns
    /// the stored value and the queried value is dropped. The result is sorted
    /// and unique even when `values` is unsorted or repeats itself. This set
    /// is not modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::{FlatSet, Natural};
    ///
    /// let set = FlatSet::from_vec(vec![2, 4, 5], Natural);
    /// assert_eq!(set.intersection([6, 2, 3, 5, 2]).as_slice(), &[2, 5]);
    ///
    /// let by_key = |left: &(u8, &str), right: &(u8, &str)| left.0 < right.0;
    /// let stored = FlatSet::from_vec(vec![(1, "stored"), (2, "stored")], by_key);
    /// let common = stored.intersection([(2, "queried")]);
    /// assert_eq!(common.as_slice(), &[(2, "stored")]);
    /// ```
    #[must_use]
    pub fn intersection<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
        C: Clone,
    {
        let mut hits = vec![false; self.storage.len()];
        let mut traversal = Traversal::new(values.into_iter(), Bound::Lower);
        while let Some((index, value)) = traversal.step(&self.storage) {
            if self.storage.matches_at(index, &value) {
                hits[index] = true;
            }
        }

        let data: Vec<T> = self
            .storage
            .data
            .iter()
            .zip(hits)
            .filter_map(|(value, hit)| hit.then(|| value.clone()))
            .collect();
        tracing::trace!(kept = data.len(), of = self.storage.len(), "intersected flat set");

        Self {
            storage: Storage {
                data,
                compare: self.storage.compare.clone(),
            },
        }
    }

    /// Returns a new set holding the stored values that have no equivalent
    /// among `values`.
    ///
    /// This set is not modified.
    #[must_use]
    pub fn difference<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
        C: Clone,
    {
        let mut difference = self.clone();
        let mut traversal = Traversal::new(values.into_iter(), Bound::Lower);
        while let Some((index, value)) = traversal.step(&difference.storage) {
            if difference.storage.matches_at(index, &value) {
                difference.storage.data.remove(index);
            }
        }
        tracing::trace!(
            kept = difference.len(),
            of = self.storage.len(),
            "differenced flat set"
        );
        difference
    }
}

shared_queries!(FlatSet);

impl<T: std::fmt::Debug, C> std::fmt::Debug for FlatSet<T, C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.storage.data.iter()).finish()
    }
}

const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "from_sorted_vec requires strictly increasing elements (sorted + deduplicated)";
