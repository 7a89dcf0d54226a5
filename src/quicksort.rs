//! The divide-and-conquer driver shared by the deterministic and randomized sorts.
//!
//! Both variants run the same recursion and the same [`partition`] routine. They only differ in
//! the [`PivotPolicy`] that picks which element of the active range is moved to its end before
//! partitioning.
//!
//! Recursion happens on the call stack up to a configurable logical depth. Deeper ranges are
//! handled on an explicit heap-allocated work-list, in exactly the same order, so adversarial
//! inputs that drive the deterministic variant to `O(n)` depth cannot overflow the stack.

use rand::Rng;

use crate::partition::partition;

/// Logical depth up to which [`Quicksort`] recurses on the call stack.
pub const DEFAULT_RECURSION_LIMIT: usize = 512;

/// Decides which element of a range is used as the pivot.
pub trait PivotPolicy {
    /// Returns a position in `low..=high`. `low < high` always holds.
    fn choose_pivot(&mut self, low: usize, high: usize) -> usize;
}

/// Always partitions around the last element of the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct LastElement;

impl PivotPolicy for LastElement {
    #[inline(always)]
    fn choose_pivot(&mut self, _low: usize, high: usize) -> usize {
        high
    }
}

/// Partitions around an element drawn uniformly at random from the range, one independent draw
/// per partition.
#[derive(Debug)]
pub struct UniformRandom<R> {
    rng: R,
}

impl<R: Rng> UniformRandom<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PivotPolicy for UniformRandom<R> {
    #[inline]
    fn choose_pivot(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }
}

/// One partition performed while sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionCall {
    pub low: usize,
    pub high: usize,
    pub pivot_index: usize,
    /// Logical recursion depth of the range, the full range being 0.
    pub depth: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    pub partitions: usize,
    /// Deepest logical recursion level at which a partition happened.
    pub max_depth: usize,
    /// Set if the recursion limit was reached and the work-list took over.
    pub spilled: bool,
}

pub struct Quicksort<P> {
    policy: P,
    recursion_limit: usize,
}

impl Quicksort<LastElement> {
    pub fn deterministic() -> Self {
        Self::new(LastElement)
    }
}

impl<R: Rng> Quicksort<UniformRandom<R>> {
    pub fn randomized(rng: R) -> Self {
        Self::new(UniformRandom::new(rng))
    }
}

impl<P: PivotPolicy> Quicksort<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Sets the logical depth after which ranges are processed on the explicit work-list. Zero
    /// disables call stack recursion entirely.
    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    /// Sorts the whole slice.
    pub fn sort<T: Ord>(&mut self, v: &mut [T]) -> SortStats {
        match v.len() {
            0 | 1 => SortStats::default(),
            len => self.sort_range(v, 0, len - 1),
        }
    }

    /// Sorts the inclusive range `v[low..=high]`. A range with `low >= high` holds at most one
    /// element and is left as is.
    pub fn sort_range<T: Ord>(&mut self, v: &mut [T], low: usize, high: usize) -> SortStats {
        self.sort_range_observed(v, low, high, |_| {})
    }

    /// Like [`Self::sort_range`], calling `on_partition` after every partition in the order they
    /// are performed.
    pub fn sort_range_observed<T, F>(
        &mut self,
        v: &mut [T],
        low: usize,
        high: usize,
        mut on_partition: F,
    ) -> SortStats
    where
        T: Ord,
        F: FnMut(PartitionCall),
    {
        let mut stats = SortStats::default();
        self.recurse(v, low, high, 0, &mut stats, &mut on_partition);
        stats
    }

    fn recurse<T, F>(
        &mut self,
        v: &mut [T],
        low: usize,
        high: usize,
        depth: usize,
        stats: &mut SortStats,
        on_partition: &mut F,
    ) where
        T: Ord,
        F: FnMut(PartitionCall),
    {
        if low >= high {
            return;
        }

        if depth >= self.recursion_limit {
            stats.spilled = true;
            self.drain_work_list(v, low, high, depth, stats, on_partition);
            return;
        }

        let pivot_index = self.partition_step(v, low, high, depth, stats, on_partition);

        if pivot_index > low {
            self.recurse(v, low, pivot_index - 1, depth + 1, stats, on_partition);
        }
        self.recurse(v, pivot_index + 1, high, depth + 1, stats, on_partition);
    }

    fn drain_work_list<T, F>(
        &mut self,
        v: &mut [T],
        low: usize,
        high: usize,
        depth: usize,
        stats: &mut SortStats,
        on_partition: &mut F,
    ) where
        T: Ord,
        F: FnMut(PartitionCall),
    {
        // Only ranges with at least two elements are pushed, so the list never holds more than
        // one entry per pending logical level.
        let mut pending = vec![(low, high, depth)];

        while let Some((low, high, depth)) = pending.pop() {
            let pivot_index = self.partition_step(v, low, high, depth, stats, on_partition);

            // Push the right side first, the left side is popped next. Same order as `recurse`.
            if pivot_index + 1 < high {
                pending.push((pivot_index + 1, high, depth + 1));
            }
            if pivot_index > low + 1 {
                pending.push((low, pivot_index - 1, depth + 1));
            }
        }
    }

    #[inline]
    fn partition_step<T, F>(
        &mut self,
        v: &mut [T],
        low: usize,
        high: usize,
        depth: usize,
        stats: &mut SortStats,
        on_partition: &mut F,
    ) -> usize
    where
        T: Ord,
        F: FnMut(PartitionCall),
    {
        let pivot_pos = self.policy.choose_pivot(low, high);
        debug_assert!((low..=high).contains(&pivot_pos));

        // Move the chosen pivot to the end, where `partition` expects it.
        v.swap(pivot_pos, high);
        let pivot_index = partition(v, low, high);

        stats.partitions += 1;
        stats.max_depth = stats.max_depth.max(depth);
        on_partition(PartitionCall {
            low,
            high,
            pivot_index,
            depth,
        });

        pivot_index
    }
}
