//! Quicksort with the last element of every range as pivot.
//!
//! Fully deterministic: the same input always produces the same sequence of partitions. On
//! already sorted and reverse sorted input every partition splits off a single element, so these
//! inputs take `O(n^2)` time and reach a logical recursion depth of `O(n)`. This is kept as is, it
//! is the behavior the randomized variant is compared against.

use crate::quicksort::{PartitionCall, Quicksort, SortStats};

/// Sorts the slice in ascending order.
pub fn sort<T: Ord>(v: &mut [T]) {
    Quicksort::deterministic().sort(v);
}

/// Sorts the inclusive range `v[low..=high]`, `low >= high` is a no-op.
pub fn sort_range<T: Ord>(v: &mut [T], low: usize, high: usize) {
    Quicksort::deterministic().sort_range(v, low, high);
}

/// Like [`sort`], also returning the [`SortStats`] of the run.
pub fn sort_with_stats<T: Ord>(v: &mut [T]) -> SortStats {
    Quicksort::deterministic().sort(v)
}

/// Sorts the slice and returns every partition performed, in order.
pub fn trace_partitions<T: Ord>(v: &mut [T]) -> Vec<PartitionCall> {
    let mut calls = Vec::new();
    if v.len() > 1 {
        let high = v.len() - 1;
        Quicksort::deterministic().sort_range_observed(v, 0, high, |call| calls.push(call));
    }

    calls
}
