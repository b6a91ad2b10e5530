//! Ordered backing storage shared by [`FlatSet`](super::FlatSet) and
//! [`FlatMultiSet`](super::FlatMultiSet).
//!
//! `Storage` owns the comparator and a `Vec<T>` that is kept sorted under it.
//! It knows nothing about uniqueness; the containers layer their own insert and
//! erase policies on top of the primitives here.

use crate::compare::Compare;

use super::error::OrderError;

/// Which bound a search computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    /// First position whose element is not ordered before the value.
    Lower,
    /// First position whose element is ordered strictly after the value.
    Upper,
}

impl Bound {
    /// Returns `true` while `element` lies before the bound of `value`.
    ///
    /// The upper bound reuses the lower-bound search with the flipped,
    /// negated comparator: `!less(value, element)`.
    #[inline]
    pub(crate) fn precedes<T, C: Compare<T>>(self, compare: &C, element: &T, value: &T) -> bool {
        match self {
            Self::Lower => compare.less(element, value),
            Self::Upper => !compare.less(value, element),
        }
    }
}

#[derive(Clone)]
pub(crate) struct Storage<T, C> {
    pub(crate) data: Vec<T>,
    pub(crate) compare: C,
}

impl<T, C: Compare<T>> Storage<T, C> {
    #[inline]
    pub(crate) const fn new(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    /// Takes ownership of `data` and sorts it stably, so equivalent values keep
    /// their original relative order.
    pub(crate) fn from_unsorted(mut data: Vec<T>, compare: C) -> Self {
        stable_sort(&mut data, &compare);
        Self { data, compare }
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn par_from_unsorted(mut data: Vec<T>, compare: C) -> Self
    where
        T: Send,
        C: Sync,
    {
        use rayon::slice::ParallelSliceMut;

        if data.len() < PARALLEL_SORT_THRESHOLD {
            stable_sort(&mut data, &compare);
        } else {
            // `par_sort_by` is a stable merge sort.
            data.par_sort_by(|left, right| compare.ordering(left, right));
        }
        Self { data, compare }
    }

    /// Adopts `data` without sorting, after checking that it already is.
    ///
    /// With `unique` set, equivalent neighbours are rejected as well.
    pub(crate) fn from_sorted(data: Vec<T>, compare: C, unique: bool) -> Result<Self, OrderError> {
        check_sorted(&data, &compare, unique)?;
        Ok(Self { data, compare })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub(crate) fn lower_bound(&self, value: &T) -> usize {
        self.bound(Bound::Lower, value)
    }

    #[inline]
    pub(crate) fn upper_bound(&self, value: &T) -> usize {
        self.bound(Bound::Upper, value)
    }

    #[inline]
    pub(crate) fn bound(&self, bound: Bound, value: &T) -> usize {
        self.bound_from(bound, value, 0)
    }

    /// Binary search for `bound` restricted to `data[from..]`.
    #[inline]
    pub(crate) fn bound_from(&self, bound: Bound, value: &T, from: usize) -> usize {
        from + self.data[from..].partition_point(|element| bound.precedes(&self.compare, element, value))
    }

    /// Returns `true` if the element at `index` exists and is equivalent to
    /// `value`. Callers pass a lower bound, so only one comparison is needed.
    #[inline]
    pub(crate) fn matches_at(&self, index: usize, value: &T) -> bool {
        self.data
            .get(index)
            .is_some_and(|element| !self.compare.less(value, element))
    }

    /// Inserts `value` at `index`, shifting the tail right by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    pub(crate) fn insert_at(&mut self, index: usize, value: T) {
        if index == self.data.len() {
            self.data.push(value);
        } else {
            self.data.insert(index, value);
        }
    }

    /// Merges an already sorted `incoming` sequence into this storage.
    ///
    /// Elements are moved into one freshly allocated vector. On equivalent
    /// elements the ones already stored come first.
    pub(crate) fn merge_sorted(&mut self, incoming: Vec<T>) {
        if incoming.is_empty() {
            return;
        }
        if self.data.is_empty() {
            self.data = incoming;
            return;
        }

        let mut merged = Vec::with_capacity(self.data.len() + incoming.len());
        let mut existing = std::mem::take(&mut self.data).into_iter().peekable();
        let mut incoming = incoming.into_iter().peekable();

        loop {
            let take_incoming = match (existing.peek(), incoming.peek()) {
                (Some(left), Some(right)) => self.compare.less(right, left),
                _ => break,
            };
            merged.extend(if take_incoming {
                incoming.next()
            } else {
                existing.next()
            });
        }
        merged.extend(existing);
        merged.extend(incoming);

        self.data = merged;
    }

    /// Collapses every run of equivalent elements to its first element.
    pub(crate) fn dedup(&mut self) {
        let compare = &self.compare;
        self.data
            .dedup_by(|current, kept| !compare.less(kept, current));
    }
}

#[cfg(feature = "rayon")]
const PARALLEL_SORT_THRESHOLD: usize = 4096;

/// Stable sort under `compare`.
pub(crate) fn stable_sort<T, C: Compare<T>>(data: &mut [T], compare: &C) {
    data.sort_by(|left, right| compare.ordering(left, right));
}

/// Checks that `data` is ordered under `compare`.
pub(crate) fn check_sorted<T, C: Compare<T>>(
    data: &[T],
    compare: &C,
    unique: bool,
) -> Result<(), OrderError> {
    for (offset, pair) in data.windows(2).enumerate() {
        let index = offset + 1;
        if compare.less(&pair[1], &pair[0]) {
            return Err(OrderError::OutOfOrder { index });
        }
        if unique && !compare.less(&pair[0], &pair[1]) {
            return Err(OrderError::Duplicate { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Natural;
    use rstest::rstest;

    fn by_key(left: &(i32, char), right: &(i32, char)) -> bool {
        left.0 < right.0
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 3)]
    #[case(4, 3)]
    #[case(5, 4)]
    fn lower_bound_on_runs(#[case] value: i32, #[case] expected: usize) {
        let storage = Storage::from_unsorted(vec![2, 2, 2, 4], Natural);
        assert_eq!(storage.lower_bound(&value), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 3)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(5, 4)]
    fn upper_bound_on_runs(#[case] value: i32, #[case] expected: usize) {
        let storage = Storage::from_unsorted(vec![2, 2, 2, 4], Natural);
        assert_eq!(storage.upper_bound(&value), expected);
    }

    #[rstest]
    fn bounds_on_empty_storage_are_zero() {
        let storage: Storage<i32, Natural> = Storage::new(Natural);
        assert_eq!(storage.lower_bound(&7), 0);
        assert_eq!(storage.upper_bound(&7), 0);
    }

    #[rstest]
    fn bound_from_searches_only_the_tail() {
        let storage = Storage::from_unsorted(vec![1, 2, 2, 2, 3], Natural);
        assert_eq!(storage.bound_from(Bound::Upper, &2, 2), 4);
        assert_eq!(storage.bound_from(Bound::Lower, &2, 2), 2);
    }

    #[rstest]
    #[case::front(0, vec![9, 1, 2, 3])]
    #[case::middle(2, vec![1, 2, 9, 3])]
    #[case::back(3, vec![1, 2, 3, 9])]
    fn insert_at_shifts_tail(#[case] index: usize, #[case] expected: Vec<i32>) {
        let mut storage = Storage::from_unsorted(vec![1, 2, 3], Natural);
        storage.insert_at(index, 9);
        assert_eq!(storage.data, expected);
    }

    #[rstest]
    fn from_unsorted_is_stable() {
        let storage = Storage::from_unsorted(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')], by_key);
        assert_eq!(storage.data, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[rstest]
    fn merge_sorted_prefers_existing_on_ties() {
        let mut storage = Storage::from_unsorted(vec![(1, 'a'), (3, 'a')], by_key);
        storage.merge_sorted(vec![(1, 'b'), (2, 'b'), (3, 'b'), (4, 'b')]);
        assert_eq!(
            storage.data,
            vec![(1, 'a'), (1, 'b'), (2, 'b'), (3, 'a'), (3, 'b'), (4, 'b')]
        );
    }

    #[rstest]
    fn merge_sorted_into_empty_adopts_incoming() {
        let mut storage = Storage::new(Natural);
        storage.merge_sorted(vec![1, 2, 3]);
        assert_eq!(storage.data, vec![1, 2, 3]);
    }

    #[rstest]
    fn merge_sorted_with_empty_is_noop() {
        let mut storage = Storage::from_unsorted(vec![3, 1], Natural);
        storage.merge_sorted(Vec::new());
        assert_eq!(storage.data, vec![1, 3]);
    }

    #[rstest]
    fn dedup_keeps_first_of_each_run() {
        let mut storage =
            Storage::from_unsorted(vec![(1, 'a'), (1, 'b'), (2, 'c'), (2, 'd'), (3, 'e')], by_key);
        storage.dedup();
        assert_eq!(storage.data, vec![(1, 'a'), (2, 'c'), (3, 'e')]);
    }

    #[rstest]
    fn matches_at_checks_equivalence() {
        let storage = Storage::from_unsorted(vec![2, 4], Natural);
        assert!(storage.matches_at(0, &2));
        assert!(!storage.matches_at(1, &3));
        assert!(!storage.matches_at(2, &5));
    }

    #[rstest]
    #[case::sorted(vec![1, 2, 2, 3], false, Ok(()))]
    #[case::out_of_order(vec![1, 3, 2], false, Err(OrderError::OutOfOrder { index: 2 }))]
    #[case::duplicate(vec![1, 2, 2], true, Err(OrderError::Duplicate { index: 2 }))]
    #[case::empty(vec![], true, Ok(()))]
    fn check_sorted_reports_first_violation(
        #[case] data: Vec<i32>,
        #[case] unique: bool,
        #[case] expected: Result<(), OrderError>,
    ) {
        assert_eq!(check_sorted(&data, &Natural, unique), expected);
    }
}
