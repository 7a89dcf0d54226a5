/// Takes the inclusive range `v[low..=high]` and re-arranges it around the pivot value `v[high]`
/// such that all elements `<= pivot` come first, followed by the pivot itself, followed by all
/// elements `> pivot`.
///
/// Returns the final position of the pivot. Every element in `low..pivot_index` is `<=` the
/// pivot, every element in `pivot_index + 1..=high` is `>` the pivot.
///
/// This is the Lomuto scheme: a single left-to-right pass that grows the `<= pivot` prefix, so
/// it performs `high - low` comparisons and uses no extra memory. On already sorted input every
/// element ends up in the prefix, which is what makes last-element quicksort quadratic there.
///
/// Panics if `high` is out of bounds. `low > high` is a caller error.
pub fn partition<T: Ord>(v: &mut [T], low: usize, high: usize) -> usize {
    debug_assert!(low <= high, "empty partition range {low}..={high}");

    let (rest, pivot) = v[low..=high].split_at_mut(high - low);
    let pivot = &pivot[0];

    // Number of elements found so far that belong left of the pivot.
    let mut num_le = 0;
    for j in 0..rest.len() {
        if rest[j] <= *pivot {
            rest.swap(num_le, j);
            num_le += 1;
        }
    }

    // Place the pivot between the two partitions.
    let pivot_index = low + num_le;
    v.swap(pivot_index, high);

    pivot_index
}
