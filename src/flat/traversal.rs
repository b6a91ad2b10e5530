//! Batch search that exploits locality between consecutive queries.
//!
//! A [`Traversal`] pulls query values one at a time and computes each value's
//! bound in the storage as it is *at the moment of the step*. Callers are free
//! to mutate the storage between steps, which is how batch updates insert
//! every value in lockstep with the search:
//!
//! ```text
//! let mut traversal = Traversal::new(values, Bound::Upper);
//! while let Some((index, value)) = traversal.step(&storage) {
//!     storage.insert_at(index, value);
//! }
//! ```
//!
//! The previous bound is kept as a cursor. The next query gallops away from
//! the cursor (left or right, doubling the stride) until a window brackets its
//! bound, and a binary search inside that window finishes the job. Sorted or
//! nearly sorted input therefore costs O(log k) per query for a distance k,
//! and random input degrades to the usual O(log n).

use crate::compare::Compare;

use super::storage::{Bound, Storage};

pub(crate) struct Traversal<I> {
    values: I,
    bound: Bound,
    cursor: usize,
}

impl<I: Iterator> Traversal<I> {
    pub(crate) const fn new(values: I, bound: Bound) -> Self {
        Self {
            values,
            bound,
            cursor: 0,
        }
    }

    /// Consumes the next query and returns its bound in `storage`, or `None`
    /// once the queries are exhausted.
    ///
    /// Stopping early leaves the remaining queries unconsumed and has no other
    /// effect.
    pub(crate) fn step<C>(&mut self, storage: &Storage<I::Item, C>) -> Option<(usize, I::Item)>
    where
        C: Compare<I::Item>,
    {
        let value = self.values.next()?;
        let index = self.search(storage, &value);
        self.cursor = index;
        Some((index, value))
    }

    fn search<C>(&self, storage: &Storage<I::Item, C>, value: &I::Item) -> usize
    where
        C: Compare<I::Item>,
    {
        let data = storage.as_slice();
        let size = data.len();
        let bound = self.bound;
        let precedes = |element: &I::Item| bound.precedes(&storage.compare, element, value);

        // Indices may have shifted under us; the cursor is only a hint.
        let cursor = self.cursor.min(size);

        let (low, high) = if cursor == size || !precedes(&data[cursor]) {
            // The bound is at or before the cursor: gallop left.
            let mut high = cursor;
            let mut stride = 1;
            let low = loop {
                if stride > cursor {
                    break 0;
                }
                let probe = cursor - stride;
                if precedes(&data[probe]) {
                    break probe + 1;
                }
                high = probe;
                stride *= 2;
            };
            (low, high)
        } else {
            // The bound is after the cursor: gallop right.
            let mut low = cursor + 1;
            let mut stride = 1;
            let high = loop {
                let probe = cursor.saturating_add(stride);
                if probe >= size {
                    break size;
                }
                if !precedes(&data[probe]) {
                    break probe;
                }
                low = probe + 1;
                stride *= 2;
            };
            (low, high)
        };

        low + data[low..high].partition_point(precedes)
    }
}
