//! # flatset
//!
//! Sorted associative containers that keep their values in one contiguous,
//! ordered `Vec` instead of a tree of nodes (similar to C++ `std::flat_set`
//! and `std::flat_multiset`).
//!
//! ## Overview
//!
//! - [`FlatSet`]: a sorted set of unique values
//! - [`FlatMultiSet`]: a sorted multiset where equivalent values keep their
//!   insertion order
//! - [`Compare`]: the strict weak ordering both containers are built on
//!
//! Reads are binary searches over contiguous memory, so they avoid the cache
//! misses of pointer-chasing trees. Batch mutation (`update`, `merge`) is
//! amortised with a locality-aware traversal search and a linear merge.
//!
//! Any index returned by a container is only valid until the next call that
//! inserts, erases or merges.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for both containers
//! - `rayon`: parallel stable sort when building from large collections
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use flatset::prelude::*;
//!
//! let mut set = FlatSet::from_vec(vec![4, 2, 4, 1], Natural);
//! assert_eq!(set.as_slice(), &[1, 2, 4]);
//!
//! assert_eq!(set.insert(3), (2, true));
//! assert_eq!(set.insert(3), (2, false));
//! assert_eq!(set.find(&4), Some(3));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use flatset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::*;
    pub use crate::flat::*;
}

pub mod compare;
pub mod flat;

pub use compare::{Compare, Natural, Reverse};
pub use flat::{FlatMultiSet, FlatSet, OrderError};
