//! Integration tests for FlatMultiSet.

use flatset::{FlatMultiSet, Natural, OrderError, Reverse};
use rstest::rstest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stable {
    value: i32,
    order: i32,
}

const fn stable(value: i32, order: i32) -> Stable {
    Stable { value, order }
}

fn by_value(left: &Stable, right: &Stable) -> bool {
    left.value < right.value
}

fn by_value_low_bits(left: &Stable, right: &Stable) -> bool {
    ((left.value as u32) << 30) < ((right.value as u32) << 30)
}

fn stable_init() -> Vec<Stable> {
    vec![
        stable(4, 0),
        stable(2, 2),
        stable(4, 3),
        stable(2, 4),
        stable(2, 5),
        stable(1, 6),
    ]
}

fn stable_update() -> Vec<Stable> {
    vec![stable(4, 7), stable(3, 8), stable(5, 9), stable(2, 10)]
}

fn stable_updated() -> Vec<Stable> {
    vec![
        stable(1, 6),
        stable(2, 2),
        stable(2, 4),
        stable(2, 5),
        stable(2, 10),
        stable(3, 8),
        stable(4, 0),
        stable(4, 3),
        stable(4, 7),
        stable(5, 9),
    ]
}

// =============================================================================
// Bounds
// =============================================================================

#[rstest]
#[case(1, 0, 0)]
#[case(2, 0, 2)]
#[case(3, 2, 2)]
#[case(4, 2, 3)]
#[case(5, 3, 3)]
fn test_bounds(#[case] value: i32, #[case] lower: usize, #[case] upper: usize) {
    let multi = FlatMultiSet::from_vec(vec![2, 2, 4], Natural);
    assert_eq!(multi.lower_bound(&value), lower);
    assert_eq!(multi.upper_bound(&value), upper);
}

#[rstest]
fn test_bounds_on_empty_multiset() {
    let multi: FlatMultiSet<i32> = FlatMultiSet::default();
    assert_eq!(multi.lower_bound(&7), 0);
    assert_eq!(multi.upper_bound(&7), 0);
    assert_eq!(multi.find(&7), None);
}

// =============================================================================
// Insert / Find / Replace
// =============================================================================

#[rstest]
fn test_insert_find_replace() {
    let mut multi = FlatMultiSet::new(Natural);

    let inserted: Vec<usize> = [3, 1, 4, 5, 1, 5]
        .into_iter()
        .map(|value| multi.insert(value))
        .collect();
    assert_eq!(inserted, vec![0, 0, 2, 3, 1, 5]);
    assert_eq!(multi.as_slice(), &[1, 1, 3, 4, 5, 5]);

    assert_eq!(multi.find(&0), None);
    assert_eq!(multi.find(&1), Some(0..2));
    assert_eq!(multi.find(&2), None);
    assert_eq!(multi.find(&3), Some(2..3));
    assert_eq!(multi.find(&5), Some(4..6));
    assert_eq!(multi.find(&6), None);

    assert!(multi.replace(0, 0));
    assert!(!multi.replace(1, 4));
    assert!(multi.replace(1, 2));
    assert!(multi.replace(3, 3));
    assert!(!multi.replace(3, 6));
    assert!(multi.replace(5, 6));
    assert_eq!(multi.as_slice(), &[0, 2, 3, 3, 5, 6]);
}

#[rstest]
#[case(0, 0)]
#[case(1, 2)]
#[case(3, 1)]
#[case(5, 2)]
fn test_count(#[case] value: i32, #[case] expected: usize) {
    let multi = FlatMultiSet::from_vec(vec![5, 1, 3, 1, 5], Natural);
    assert_eq!(multi.count(&value), expected);
}

#[rstest]
fn test_erase_found_range() {
    let mut multi = FlatMultiSet::from_vec(vec![1, 2, 2, 2, 3], Natural);
    assert_eq!(multi.erase(multi.find(&2)), 3);
    assert_eq!(multi.erase(multi.find(&2)), 0);
    assert_eq!(multi.remove(&3), 1);
    assert_eq!(multi.remove(&3), 0);
    assert_eq!(multi.as_slice(), &[1]);
}

#[rstest]
fn test_erase_range_out_of_bounds_panics() {
    let mut multi = FlatMultiSet::from_vec(vec![1, 2], Natural);
    let result = std::panic::catch_unwind(move || multi.erase(1..5));
    assert!(result.is_err());
}

// =============================================================================
// Stability
// =============================================================================

#[rstest]
fn test_init_keeps_equivalents_in_input_order() {
    let multi = FlatMultiSet::from_vec(stable_init(), by_value);
    assert_eq!(
        multi.as_slice(),
        &[
            stable(1, 6),
            stable(2, 2),
            stable(2, 4),
            stable(2, 5),
            stable(4, 0),
            stable(4, 3)
        ]
    );
}

#[rstest]
fn test_update_appends_after_equivalents() {
    let mut multi = FlatMultiSet::from_vec(stable_init(), by_value);
    multi.update(stable_update());
    assert_eq!(multi.as_slice(), stable_updated().as_slice());
}

#[rstest]
fn test_merge_matches_update() {
    let mut multi = FlatMultiSet::from_vec(stable_init(), by_value);
    multi.merge(FlatMultiSet::from_vec(stable_update(), by_value));
    assert_eq!(multi.into_vec(), stable_updated());
}

#[rstest]
fn test_merge_under_distinct_comparator_instances() {
    let same: fn(&Stable, &Stable) -> bool = by_value;
    let other: fn(&Stable, &Stable) -> bool = by_value_low_bits;

    let mut with_other = FlatMultiSet::from_vec(stable_init(), same);
    with_other.merge(FlatMultiSet::from_vec(stable_update(), other));
    assert_eq!(with_other.as_slice(), stable_updated().as_slice());

    let mut with_other_type = FlatMultiSet::from_vec(stable_init(), same);
    with_other_type.merge_from(FlatMultiSet::from_vec(stable_update(), other));
    assert_eq!(with_other_type, with_other);
}

#[rstest]
fn test_merge_presorted_same_ordering() {
    let mut multi = FlatMultiSet::from_vec(vec![5, 3, 3, 1], Reverse);
    multi.merge_presorted(FlatMultiSet::from_vec(vec![4, 3, 0], Reverse));
    assert_eq!(multi.as_slice(), &[5, 4, 3, 3, 3, 1, 0]);
}

// =============================================================================
// Construction from sorted input
// =============================================================================

#[rstest]
fn test_try_from_sorted_vec_accepts_runs() {
    let multi = FlatMultiSet::try_from_sorted_vec(vec![1, 1, 2, 2, 2], Natural).unwrap();
    assert_eq!(multi.count(&2), 3);
}

#[rstest]
fn test_try_from_sorted_vec_rejects_inversion() {
    let error = FlatMultiSet::try_from_sorted_vec(vec![1, 1, 0], Natural).unwrap_err();
    assert_eq!(error, OrderError::OutOfOrder { index: 2 });
}

#[rstest]
fn test_from_sorted_vec_keeps_vector() {
    let multi = FlatMultiSet::from_sorted_vec(vec![9, 9, 4], Reverse);
    assert_eq!(multi.find(&9), Some(0..2));
}

// =============================================================================
// Queries shared with FlatSet
// =============================================================================

#[rstest]
fn test_any_all_over_runs() {
    let multi = FlatMultiSet::from_vec(vec![2, 2, 4, 5, 5], Natural);
    assert!(multi.any([7, 5]));
    assert!(!multi.any([1, 3, 6]));
    assert!(multi.all([5, 2, 2, 4]));
    assert!(!multi.all([2, 3]));
}

#[rstest]
fn test_iteration_in_both_directions() {
    let multi: FlatMultiSet<i32> = [3, 1, 3, 2].into_iter().collect();
    assert_eq!(multi.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 3]);
    assert_eq!(multi.reversed().copied().collect::<Vec<_>>(), vec![3, 3, 2, 1]);
    assert_eq!(multi.first(), Some(&1));
    assert_eq!(multi.last(), Some(&3));
    assert_eq!(multi[2], 3);
}

#[rstest]
fn test_clone_is_independent() {
    let original = FlatMultiSet::from_vec(vec![1, 2, 2], Natural);
    let mut copy = original.clone();
    copy.insert(2);
    assert_eq!(original.count(&2), 2);
    assert_eq!(copy.count(&2), 3);
}

#[rstest]
fn test_debug_lists_values() {
    let multi = FlatMultiSet::from_vec(vec![2, 1, 2], Natural);
    assert_eq!(format!("{multi:?}"), "[1, 2, 2]");
}
