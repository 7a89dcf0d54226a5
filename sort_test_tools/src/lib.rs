pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    /// Sorts the inclusive range `arr[low..=high]`. `low >= high` is a no-op.
    fn sort_range<T>(arr: &mut [T], low: usize, high: usize)
    where
        T: Ord;
}

pub mod patterns;
