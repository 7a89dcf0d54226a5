//! Quicksort with a uniformly random pivot per range.
//!
//! Before every partition an index is drawn uniformly from the active range and swapped to its
//! end, then the same partition routine as the deterministic variant runs. The expected running
//! time is `O(n log n)` for every input order. The `O(n^2)` worst case is still possible, with a
//! probability that vanishes exponentially in `n`, and is not guarded against.
//!
//! The source of randomness is always passed in, pass a seeded rng for reproducible runs.

use rand::Rng;

use crate::quicksort::{Quicksort, SortStats};

/// Sorts the slice in ascending order using the thread-local rng.
pub fn sort<T: Ord>(v: &mut [T]) {
    sort_with_rng(v, &mut rand::thread_rng());
}

pub fn sort_with_rng<T, R>(v: &mut [T], rng: &mut R)
where
    T: Ord,
    R: Rng + ?Sized,
{
    Quicksort::randomized(rng).sort(v);
}

/// Sorts the inclusive range `v[low..=high]`, `low >= high` is a no-op.
pub fn sort_range<T, R>(v: &mut [T], low: usize, high: usize, rng: &mut R)
where
    T: Ord,
    R: Rng + ?Sized,
{
    Quicksort::randomized(rng).sort_range(v, low, high);
}

/// Like [`sort_with_rng`], also returning the [`SortStats`] of the run.
pub fn sort_with_stats<T, R>(v: &mut [T], rng: &mut R) -> SortStats
where
    T: Ord,
    R: Rng + ?Sized,
{
    Quicksort::randomized(rng).sort(v)
}
