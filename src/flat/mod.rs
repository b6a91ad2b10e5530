//! Sorted associative containers stored in contiguous memory.
//!
//! - [`FlatSet`]: unique values, sorted by a [`Compare`](crate::Compare)
//! - [`FlatMultiSet`]: equivalent values allowed, kept in insertion order
//!   within each run
//!
//! Both containers keep every value in a single sorted `Vec`. Lookups are
//! binary searches; inserts shift the tail of the vector, which is cheap near
//! the end and for small containers. Batch operations (`update`, `merge`,
//! `union`, ...) avoid one full search per value, either through a linear
//! merge or through a search that reuses the position of the previous value.
//!
//! # Stability
//!
//! Equivalent values are never reordered. A `FlatSet` keeps the value it
//! already holds and discards newcomers; a `FlatMultiSet` appends newcomers
//! after the existing run.
//!
//! # Indices
//!
//! Indices returned by `find`, `insert`, `lower_bound` and `upper_bound` are
//! only valid until the next call that inserts, erases or merges. `replace`
//! never moves other elements and keeps indices valid.
//!
//! # Copies
//!
//! `clone` always deep-copies the backing vector; two containers never share
//! storage.
//!
//! # Examples
//!
//! ```rust
//! use flatset::{FlatMultiSet, FlatSet, Natural};
//!
//! let mut set = FlatSet::from_vec(vec![5, 1, 3], Natural);
//! set.update([2, 3, 4]);
//! assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5]);
//!
//! let mut multi = FlatMultiSet::from_vec(vec![5, 1, 3], Natural);
//! multi.update([2, 3, 4]);
//! assert_eq!(multi.as_slice(), &[1, 2, 3, 3, 4, 5]);
//! assert_eq!(multi.find(&3), Some(2..4));
//! ```

/// Generates the query surface both containers share: size, positional
/// access, iteration, membership and bounds. Every method delegates to the
/// container's `storage` field.
macro_rules! shared_queries {
    ($container:ident) => {
        impl<T, C: $crate::compare::Compare<T>> $container<T, C> {
            /// Returns the number of stored values.
            #[inline]
            #[must_use]
            pub fn len(&self) -> usize {
                self.storage.len()
            }

            /// Returns `true` if no values are stored.
            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.storage.data.is_empty()
            }

            /// Returns the value at `index`, or `None` past the end.
            #[inline]
            #[must_use]
            pub fn get(&self, index: usize) -> Option<&T> {
                self.storage.data.get(index)
            }

            /// Returns the first value in order.
            #[inline]
            #[must_use]
            pub fn first(&self) -> Option<&T> {
                self.storage.data.first()
            }

            /// Returns the last value in order.
            #[inline]
            #[must_use]
            pub fn last(&self) -> Option<&T> {
                self.storage.data.last()
            }

            /// Returns the stored values as a sorted slice.
            #[inline]
            #[must_use]
            pub fn as_slice(&self) -> &[T] {
                self.storage.as_slice()
            }

            /// Returns an iterator over the values in order.
            #[inline]
            pub fn iter(&self) -> $crate::flat::Iter<'_, T> {
                $crate::flat::Iter::new(self.storage.as_slice())
            }

            /// Returns an iterator over the values in reverse order.
            #[inline]
            pub fn reversed(&self) -> std::iter::Rev<$crate::flat::Iter<'_, T>> {
                self.iter().rev()
            }

            /// Returns the comparator this container is ordered by.
            #[inline]
            #[must_use]
            pub const fn comparator(&self) -> &C {
                &self.storage.compare
            }

            /// Index of the first value not ordered before `value`.
            #[inline]
            #[must_use]
            pub fn lower_bound(&self, value: &T) -> usize {
                self.storage.lower_bound(value)
            }

            /// Index of the first value ordered strictly after `value`.
            #[inline]
            #[must_use]
            pub fn upper_bound(&self, value: &T) -> usize {
                self.storage.upper_bound(value)
            }

            /// Returns `true` if a value equivalent to `value` is stored.
            #[inline]
            #[must_use]
            pub fn contains(&self, value: &T) -> bool {
                self.storage.matches_at(self.storage.lower_bound(value), value)
            }

            /// Returns `true` if any of `values` has an equivalent stored value.
            ///
            /// Stops consuming `values` at the first hit.
            pub fn any<I>(&self, values: I) -> bool
            where
                I: IntoIterator<Item = T>,
            {
                let mut traversal = $crate::flat::traversal::Traversal::new(
                    values.into_iter(),
                    $crate::flat::storage::Bound::Lower,
                );
                while let Some((index, value)) = traversal.step(&self.storage) {
                    if self.storage.matches_at(index, &value) {
                        return true;
                    }
                }
                false
            }

            /// Returns `true` if every one of `values` has an equivalent stored
            /// value, i.e. this container is a superset of `values`.
            ///
            /// An empty input yields `true`. Stops consuming `values` at the first
            /// miss.
            pub fn all<I>(&self, values: I) -> bool
            where
                I: IntoIterator<Item = T>,
            {
                let mut traversal = $crate::flat::traversal::Traversal::new(
                    values.into_iter(),
                    $crate::flat::storage::Bound::Lower,
                );
                while let Some((index, value)) = traversal.step(&self.storage) {
                    if !self.storage.matches_at(index, &value) {
                        return false;
                    }
                }
                true
            }

            /// Removes every value, keeping the comparator and the allocation.
            #[inline]
            pub fn clear(&mut self) {
                self.storage.data.clear();
            }

            /// Consumes the container and returns its sorted values.
            #[inline]
            #[must_use]
            pub fn into_vec(self) -> Vec<T> {
                self.storage.data
            }
        }

        impl<T, C> std::ops::Index<usize> for $container<T, C> {
            type Output = T;

            /// # Panics
            ///
            /// Panics if `index` is out of bounds.
            #[inline]
            fn index(&self, index: usize) -> &T {
                &self.storage.data[index]
            }
        }

        impl<T, C: $crate::compare::Compare<T> + Default> Default for $container<T, C> {
            #[inline]
            fn default() -> Self {
                Self::new(C::default())
            }
        }

        impl<T, C: $crate::compare::Compare<T> + Default> FromIterator<T> for $container<T, C> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self::from_vec(iter.into_iter().collect(), C::default())
            }
        }

        impl<T, C: $crate::compare::Compare<T> + Default> From<Vec<T>> for $container<T, C> {
            #[inline]
            fn from(values: Vec<T>) -> Self {
                Self::from_vec(values, C::default())
            }
        }

        impl<T, C: $crate::compare::Compare<T>> Extend<T> for $container<T, C> {
            #[inline]
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                self.update(iter);
            }
        }

        impl<T: PartialEq, C> PartialEq for $container<T, C> {
            fn eq(&self, other: &Self) -> bool {
                self.storage.data == other.storage.data
            }
        }

        impl<T: Eq, C> Eq for $container<T, C> {}

        impl<'a, T, C> IntoIterator for &'a $container<T, C> {
            type Item = &'a T;
            type IntoIter = $crate::flat::Iter<'a, T>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                $crate::flat::Iter::new(&self.storage.data)
            }
        }

        impl<T, C> IntoIterator for $container<T, C> {
            type Item = T;
            type IntoIter = $crate::flat::IntoIter<T>;

            #[inline]
            fn into_iter(self) -> Self::IntoIter {
                $crate::flat::IntoIter::new(self.storage.data)
            }
        }
    };
}

mod error;
mod iter;
mod multiset;
mod set;
pub(crate) mod storage;
pub(crate) mod traversal;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::OrderError;
pub use iter::IntoIter;
pub use iter::Iter;
pub use multiset::FlatMultiSet;
pub use set::FlatSet;

static_assertions::assert_impl_all!(FlatSet<i32, crate::Natural>: Send, Sync, Clone);
static_assertions::assert_impl_all!(FlatMultiSet<String, crate::Reverse>: Send, Sync, Clone);
