//! Sorted multiset stored in contiguous memory.
//!
//! [`FlatMultiSet`] allows equivalent values and guarantees they stay in the
//! order they were added: a new value always lands after every value it is
//! equivalent to.

use std::ops::Range;

use crate::compare::{Compare, Natural};

use super::error::OrderError;
use super::storage::{self, Bound, Storage};
use super::traversal::Traversal;

/// A sorted associative container that allows equivalent values.
///
/// A maximal block of mutually equivalent values is a *run*. Runs keep the
/// relative order in which their values were added, across construction,
/// inserts, merges and updates.
///
/// # Examples
///
/// ```rust
/// use flatset::{FlatMultiSet, Natural};
///
/// let mut multi = FlatMultiSet::new(Natural);
/// let indices: Vec<usize> = [3, 1, 4, 5, 1, 5].into_iter().map(|value| multi.insert(value)).collect();
/// assert_eq!(indices, vec![0, 0, 2, 3, 1, 5]);
///
/// assert_eq!(multi.find(&1), Some(0..2));
/// assert_eq!(multi.find(&2), None);
/// assert_eq!(multi.remove(&5), 2);
/// assert_eq!(multi.as_slice(), &[1, 1, 3, 4]);
/// ```
#[derive(Clone)]
pub struct FlatMultiSet<T, C = Natural> {
    storage: Storage<T, C>,
}

impl<T, C: Compare<T>> FlatMultiSet<T, C> {
    /// Creates an empty multiset ordered by `compare`.
    #[inline]
    #[must_use]
    pub const fn new(compare: C) -> Self {
        Self {
            storage: Storage::new(compare),
        }
    }

    /// Creates an empty multiset with room for `capacity` values.
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

    /// Creates a multiset from arbitrary values, sorted stably.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::FlatMultiSet;
    ///
    /// let by_key = |left: &(i32, char), right: &(i32, char)| left.0 < right.0;
    /// let multi = FlatMultiSet::from_vec(vec![(4, 'a'), (2, 'b'), (4, 'c'), (2, 'd')], by_key);
    /// assert_eq!(multi.as_slice(), &[(2, 'b'), (2, 'd'), (4, 'a'), (4, 'c')]);
    /// ```
    #[must_use]
    pub fn from_vec(values: Vec<T>, compare: C) -> Self {
        Self {
            storage: Storage::from_unsorted(values, compare),
        }
    }

    /// Creates a multiset from arbitrary values, sorting large inputs in
    /// parallel. Same result as [`FlatMultiSet::from_vec`].
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn par_from_vec(values: Vec<T>, compare: C) -> Self
    where
        T: Send,
        C: Sync,
    {
        Self {
            storage: Storage::par_from_unsorted(values, compare),
        }
    }

    /// Creates a multiset from values already sorted under `compare`.
    ///
    /// Checked with `debug_assert!` only; see
    /// [`FlatMultiSet::try_from_sorted_vec`].
    #[must_use]
    pub fn from_sorted_vec(values: Vec<T>, compare: C) -> Self {
        debug_assert!(
            storage::check_sorted(&values, &compare, false).is_ok(),
            "from_sorted_vec requires sorted elements"
        );
        Self {
            storage: Storage {
                data: values,
                compare,
            },
        }
    }

    /// Creates a multiset from values that should already be sorted under
    /// `compare`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OutOfOrder`] with the index of the first value
    /// ordered before its predecessor.
    pub fn try_from_sorted_vec(values: Vec<T>, compare: C) -> Result<Self, OrderError> {
        Storage::from_sorted(values, compare, false).map(|storage| Self { storage })
    }

    /// Returns the half-open range of values equivalent to `value`, or `None`
    /// if there are none.
    ///
    /// The end of the run is searched for only after its start.
    #[must_use]
    pub fn find(&self, value: &T) -> Option<Range<usize>> {
        let from = self.storage.lower_bound(value);
        if !self.storage.matches_at(from, value) {
            return None;
        }
        let upto = self.storage.bound_from(Bound::Upper, value, from + 1);
        Some(from..upto)
    }

    /// Returns the number of values equivalent to `value`.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        self.find(value).map_or(0, |range| range.len())
    }

    /// Inserts `value` after every value equivalent to it and returns its
    /// index. Invalidates previously obtained indices.
    #[inline]
    pub fn insert(&mut self, value: T) -> usize {
        let index = self.storage.upper_bound(&value);
        self.storage.insert_at(index, value);
        index
    }

    /// Removes the values in `range` and returns how many were removed.
    ///
    /// Accepts a plain `Range<usize>` or the `Option<Range<usize>>` returned
    /// by [`find`](Self::find); `None` removes nothing.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatset::{FlatMultiSet, Natural};
    ///
    /// let mut multi = FlatMultiSet::from_vec(vec![1, 2, 2, 3], Natural);
    /// assert_eq!(multi.erase(multi.find(&2)), 2);
    /// assert_eq!(multi.erase(multi.find(&2)), 0);
    /// assert_eq!(multi.erase(0..1), 1);
    /// assert_eq!(multi.as_slice(), &[3]);
    /// ```
    pub fn erase<R>(&mut self, range: R) -> usize
    where
        R: Into<Option<Range<usize>>>,
    {
        range.into().map_or(0, |range| {
            let removed = range.len();
            self.storage.data.drain(range);
            removed
        })
    }

    /// Removes every value equivalent to `value` and returns how many were
    /// removed.
    pub fn remove(&mut self, value: &T) -> usize {
        let found = self.find(value);
        self.erase(found)
    }

    /// Overwrites the value at `index` unless `value` would be ordered before
    /// its left neighbour or after its right neighbour.
    ///
    /// Unlike [`FlatSet::replace`](super::FlatSet::replace), being equivalent
    /// to a neighbour is allowed. Returns `false` if `index` is out of bounds
    /// or the order would break. Other indices stay valid.
    pub fn replace(&mut self, index: usize, value: T) -> bool {
        let data = &self.storage.data;
        let compare = &self.storage.compare;
        if index >= data.len()
            || (index > 0 && compare.less(&value, &data[index - 1]))
            || (index + 1 < data.len() && compare.less(&data[index + 1], &value))
        {
            return false;
        }
        self.storage.data[index] = value;
        true
    }

    /// Moves every value of `other` into this multiset. Values of `other` land
    /// after equivalent values already stored.
    ///
    /// `other` is re-sorted first unless both comparators are known to order
    /// identically (see [`Compare::same_ordering`]).
    pub fn merge(&mut self, other: Self) {
        let presorted = self.storage.compare.same_ordering(&other.storage.compare);
        self.merge_values(other.storage.data, presorted);
    }

    /// Like [`merge`](Self::merge), with the caller asserting that `other` is
    /// ordered by an equivalent comparator.
    pub fn merge_presorted(&mut self, other: Self) {
        debug_assert!(
            storage::check_sorted(&other.storage.data, &self.storage.compare, false).is_ok(),
            "merge_presorted requires input ordered by an equivalent comparator"
        );
        self.merge_values(other.storage.data, true);
    }

    /// Moves every value of a multiset ordered by a different comparator type
    /// into this one. The incoming values are always re-sorted.
    pub fn merge_from<D: Compare<T>>(&mut self, other: FlatMultiSet<T, D>) {
        self.merge_values(other.storage.data, false);
    }

    fn merge_values(&mut self, mut incoming: Vec<T>, presorted: bool) {
        let incoming_len = incoming.len();
        if !presorted {
            storage::stable_sort(&mut incoming, &self.storage.compare);
        }
        let before = self.storage.len();
        self.storage.merge_sorted(incoming);
        tracing::debug!(
            existing = before,
            incoming = incoming_len,
            resorted = !presorted,
            "merged flat multiset"
        );
    }

    /// Inserts every one of `values`, each after the values equivalent to it.
    ///
    /// Equivalent values within `values` keep their relative order.
    pub fn update<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut traversal = Traversal::new(values.into_iter(), Bound::Upper);
        let mut inserted = 0_usize;
        while let Some((index, value)) = traversal.step(&self.storage) {
            self.storage.insert_at(index, value);
            inserted += 1;
        }
        tracing::trace!(inserted, "updated flat multiset");
    }
}

shared_queries!(FlatMultiSet);

impl<T: std::fmt::Debug, C> std::fmt::Debug for FlatMultiSet<T, C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.storage.data.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Reverse;
    use rstest::rstest;

    fn by_key(left: &(i32, char), right: &(i32, char)) -> bool {
        left.0 < right.0
    }

    #[rstest]
    #[case(1, 0, 0)]
    #[case(2, 0, 2)]
    #[case(3, 2, 2)]
    #[case(4, 2, 3)]
    #[case(5, 3, 3)]
    fn bounds_span_runs(#[case] value: i32, #[case] lower: usize, #[case] upper: usize) {
        let multi = FlatMultiSet::from_vec(vec![2, 2, 4], Natural);
        assert_eq!(multi.lower_bound(&value), lower);
        assert_eq!(multi.upper_bound(&value), upper);
    }

    #[rstest]
    #[case::single_at_end(vec![1, 2], 2, Some(1..2))]
    #[case::pair_at_end(vec![1, 2, 2], 2, Some(1..3))]
    #[case::pair_before_last(vec![1, 2, 2, 3], 2, Some(1..3))]
    #[case::whole(vec![7, 7, 7], 7, Some(0..3))]
    #[case::missing(vec![1, 3], 2, None)]
    #[case::empty(vec![], 2, None)]
    fn find_returns_whole_run(
        #[case] values: Vec<i32>,
        #[case] query: i32,
        #[case] expected: Option<Range<usize>>,
    ) {
        let multi = FlatMultiSet::from_vec(values, Natural);
        assert_eq!(multi.find(&query), expected);
    }

    #[rstest]
    fn insert_appends_to_run() {
        let mut multi = FlatMultiSet::from_vec(vec![(1, 'a'), (1, 'b')], by_key);
        assert_eq!(multi.insert((1, 'c')), 2);
        assert_eq!(multi.as_slice(), &[(1, 'a'), (1, 'b'), (1, 'c')]);
    }

    #[rstest]
    fn count_matches_run_length() {
        let multi = FlatMultiSet::from_vec(vec![3, 1, 3, 3], Natural);
        assert_eq!(multi.count(&3), 3);
        assert_eq!(multi.count(&2), 0);
    }

    #[rstest]
    fn replace_allows_equal_neighbours() {
        let mut multi = FlatMultiSet::from_vec(vec![1, 1, 3, 4, 5, 5], Natural);
        assert!(multi.replace(0, 0));
        assert!(multi.replace(1, 2));
        assert!(!multi.replace(2, 1));
        assert!(multi.replace(3, 3));
        assert!(!multi.replace(4, 6));
        assert!(multi.replace(5, 6));
        assert!(!multi.replace(5, 4));
        assert!(!multi.replace(6, 9));
        assert_eq!(multi.as_slice(), &[0, 2, 3, 3, 5, 6]);
    }

    #[rstest]
    fn merge_places_incoming_after_existing_run() {
        let mut multi = FlatMultiSet::from_vec(vec![(1, 'a'), (2, 'a')], by_key);
        multi.merge(FlatMultiSet::from_vec(vec![(2, 'b'), (1, 'b')], by_key));
        assert_eq!(multi.as_slice(), &[(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[rstest]
    fn merge_from_keeps_duplicates() {
        let mut multi = FlatMultiSet::from_vec(vec![1, 2], Natural);
        multi.merge_from(FlatMultiSet::from_vec(vec![2, 1, 2], Reverse));
        assert_eq!(multi.as_slice(), &[1, 1, 2, 2, 2]);
    }

    #[rstest]
    fn update_keeps_input_order_among_duplicates() {
        let mut multi = FlatMultiSet::new(by_key);
        multi.update([(2, 'a'), (1, 'b'), (2, 'c'), (2, 'd')]);
        assert_eq!(multi.as_slice(), &[(1, 'b'), (2, 'a'), (2, 'c'), (2, 'd')]);
    }

    #[rstest]
    fn erase_none_is_noop() {
        let mut multi = FlatMultiSet::from_vec(vec![1, 2], Natural);
        assert_eq!(multi.erase(None::<Range<usize>>), 0);
        assert_eq!(multi.len(), 2);
    }

    #[rstest]
    fn try_from_sorted_vec_allows_runs() {
        let multi = FlatMultiSet::try_from_sorted_vec(vec![1, 1, 2], Natural).unwrap();
        assert_eq!(multi.len(), 3);
        let error = FlatMultiSet::try_from_sorted_vec(vec![2, 1], Natural).unwrap_err();
        assert_eq!(error, OrderError::OutOfOrder { index: 1 });
    }

    #[rstest]
    fn debug_renders_as_list() {
        let multi = FlatMultiSet::from_vec(vec![2, 1, 2], Natural);
        assert_eq!(format!("{multi:?}"), "[1, 2, 2]");
    }
}
