use rand::rngs::StdRng;
use rand::SeedableRng;
use sort_test_tools::{instantiate_sort_tests, patterns, Sort};

struct DeterministicSort {}

impl Sort for DeterministicSort {
    fn name() -> String {
        "quicksort_deterministic".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        quicksort_study::deterministic::sort(arr);
    }

    fn sort_range<T>(arr: &mut [T], low: usize, high: usize)
    where
        T: Ord,
    {
        quicksort_study::deterministic::sort_range(arr, low, high);
    }
}

struct RandomizedSort {}

impl Sort for RandomizedSort {
    fn name() -> String {
        "quicksort_randomized".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        let mut rng = StdRng::seed_from_u64(patterns::random_init_seed());
        quicksort_study::randomized::sort_with_rng(arr, &mut rng);
    }

    fn sort_range<T>(arr: &mut [T], low: usize, high: usize)
    where
        T: Ord,
    {
        let mut rng = StdRng::seed_from_u64(patterns::random_init_seed());
        quicksort_study::randomized::sort_range(arr, low, high, &mut rng);
    }
}

mod deterministic {
    use super::*;

    instantiate_sort_tests!(DeterministicSort);
}

mod randomized {
    use super::*;

    instantiate_sort_tests!(RandomizedSort);
}
