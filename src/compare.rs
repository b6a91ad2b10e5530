//! Comparators for the flat containers.
//!
//! Every container in this crate is ordered by a [`Compare`] implementation
//! supplied at construction. A comparator must be a strict weak ordering:
//! irreflexive, asymmetric, transitive, and with transitive incomparability.
//! Two values are *equivalent* when neither is ordered before the other.
//!
//! Violating the contract does not cause memory unsafety, but the resulting
//! container order is unspecified.
//!
//! # Examples
//!
//! ```rust
//! use flatset::compare::{Compare, Natural, Reverse};
//!
//! assert!(Natural.less(&1, &2));
//! assert!(Reverse.less(&2, &1));
//!
//! // Any `Fn(&T, &T) -> bool` is a comparator.
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert!(by_length.less(&"ab", &"abc"));
//! assert!(by_length.equivalent(&"ab", &"cd"));
//! ```

use std::cmp::Ordering;

/// A strict weak ordering over values of type `T`.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &T, right: &T) -> bool;

    /// Returns `true` if `self` and `other` are known to order values
    /// identically.
    ///
    /// Containers use this to skip re-sorting incoming data on merge. The
    /// default answers `false`, which is always correct and costs one extra
    /// sort. Stateless orderings such as [`Natural`] answer `true`.
    fn same_ordering(&self, _other: &Self) -> bool {
        false
    }

    /// Returns `true` if neither value is ordered before the other.
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        !self.less(left, right) && !self.less(right, left)
    }

    /// Converts the predicate into a total [`Ordering`], treating equivalent
    /// values as [`Ordering::Equal`].
    #[inline]
    fn ordering(&self, left: &T, right: &T) -> Ordering {
        if self.less(left, right) {
            Ordering::Less
        } else if self.less(right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

/// Ascending order according to [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left < right
    }

    #[inline]
    fn same_ordering(&self, _other: &Self) -> bool {
        true
    }
}

/// Descending order according to [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<T: Ord + ?Sized> Compare<T> for Reverse {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left > right
    }

    #[inline]
    fn same_ordering(&self, _other: &Self) -> bool {
        true
    }
}
