//! Errors reported when adopting pre-sorted input.

/// Reason a vector was rejected by `try_from_sorted_vec`.
///
/// Every other container operation signals its outcome through `Option` or
/// `bool`; this is the only fallible constructor.
///
/// # Examples
///
/// ```rust
/// use flatset::{FlatSet, Natural, OrderError};
///
/// let error = FlatSet::try_from_sorted_vec(vec![1, 3, 2], Natural).unwrap_err();
/// assert_eq!(error, OrderError::OutOfOrder { index: 2 });
/// assert_eq!(
///     error.to_string(),
///     "element at index 2 is ordered before its predecessor"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The element at `index` sorts before the element preceding it.
    #[error("element at index {index} is ordered before its predecessor")]
    OutOfOrder {
        /// Position of the offending element.
        index: usize,
    },
    /// The element at `index` is equivalent to the element preceding it, which
    /// a unique container does not allow.
    #[error("element at index {index} is equivalent to its predecessor")]
    Duplicate {
        /// Position of the offending element.
        index: usize,
    },
}

impl OrderError {
    /// Position of the element that broke the ordering.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::OutOfOrder { index } | Self::Duplicate { index } => *index,
        }
    }
}
