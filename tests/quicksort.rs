use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sort_test_tools::patterns;

use quicksort_study::{deterministic, randomized, PartitionCall, Quicksort};

fn counts(v: &[i64]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for x in v {
        *counts.entry(*x).or_insert(0) += 1;
    }
    counts
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(patterns::random_init_seed())
}

#[test]
fn small_scenarios() {
    let cases: [(&[i64], &[i64]); 4] = [
        (&[], &[]),
        (&[5], &[5]),
        (&[3, 1, 2], &[1, 2, 3]),
        (&[2, 2, 1, 2], &[1, 2, 2, 2]),
    ];

    for (input, expected) in cases {
        let mut det = input.to_vec();
        deterministic::sort(&mut det);
        assert_eq!(det, expected);

        let mut rand = input.to_vec();
        randomized::sort_with_rng(&mut rand, &mut seeded_rng());
        assert_eq!(rand, expected);
    }
}

#[test]
fn duplicates_keep_element_counts() {
    let input = vec![2, 2, 1, 2];

    let mut det = input.clone();
    deterministic::sort(&mut det);
    let mut rand = input.clone();
    randomized::sort(&mut rand);

    for output in [det, rand] {
        assert_eq!(counts(&output), counts(&input));
        assert_eq!(counts(&output)[&2], 3);
        assert_eq!(counts(&output)[&1], 1);
    }
}

#[test]
fn deterministic_degenerates_on_sorted_input() {
    for len in [2, 5, 100, 1_000] {
        let mut v = patterns::ascending(len);
        let stats = deterministic::sort_with_stats(&mut v);

        // Every partition only splits off the pivot.
        assert_eq!(stats.partitions, len - 1);
        assert_eq!(stats.max_depth, len - 2);
        assert_eq!(v, patterns::ascending(len));
    }
}

#[test]
fn deterministic_first_partition_of_sorted_input() {
    let mut v = vec![1, 2, 3, 4, 5];
    let calls = deterministic::trace_partitions(&mut v);

    assert_eq!(
        calls[0],
        PartitionCall {
            low: 0,
            high: 4,
            pivot_index: 4,
            depth: 0
        }
    );
    assert!(calls
        .iter()
        .all(|call| call.pivot_index == call.high && call.low == 0));
}

#[test]
fn deterministic_is_reproducible() {
    let input = patterns::random(2_000);

    let mut a = input.clone();
    let mut b = input.clone();
    let calls_a = deterministic::trace_partitions(&mut a);
    let calls_b = deterministic::trace_partitions(&mut b);

    assert_eq!(a, b);
    assert_eq!(calls_a, calls_b);
}

#[test]
fn work_list_matches_recursion() {
    for input in [
        patterns::random(1_500),
        patterns::ascending(1_500),
        patterns::random_duplicates(1_500),
    ] {
        let high = input.len() - 1;

        let mut recursive = input.clone();
        let mut recursive_calls = Vec::new();
        let recursive_stats = Quicksort::deterministic()
            .with_recursion_limit(usize::MAX)
            .sort_range_observed(&mut recursive, 0, high, |call| recursive_calls.push(call));

        let mut listed = input.clone();
        let mut listed_calls = Vec::new();
        let listed_stats = Quicksort::deterministic()
            .with_recursion_limit(0)
            .sort_range_observed(&mut listed, 0, high, |call| listed_calls.push(call));

        assert_eq!(recursive, listed);
        assert_eq!(recursive_calls, listed_calls);
        assert_eq!(recursive_stats.partitions, listed_stats.partitions);
        assert_eq!(recursive_stats.max_depth, listed_stats.max_depth);
        assert!(!recursive_stats.spilled);
        assert!(listed_stats.spilled);
    }
}

#[test]
fn deep_sorted_input_spills_to_work_list() {
    let len = 8_000;
    let mut v = patterns::descending(len);

    let stats = Quicksort::deterministic()
        .with_recursion_limit(64)
        .sort(&mut v);

    assert!(stats.spilled);
    assert!(stats.max_depth > 64);
    assert_eq!(v, patterns::ascending(len));
}

#[test]
fn small_recursion_limits_still_sort() {
    for limit in [0, 1, 2, 8] {
        let mut det = patterns::random(500);
        Quicksort::deterministic()
            .with_recursion_limit(limit)
            .sort(&mut det);

        let mut rand = patterns::random(500);
        Quicksort::randomized(seeded_rng())
            .with_recursion_limit(limit)
            .sort(&mut rand);

        let mut expected = patterns::random(500);
        expected.sort();
        assert_eq!(det, expected);
        assert_eq!(rand, expected);
    }
}

#[test]
fn randomized_stays_shallow_on_sorted_input() {
    let len = 10_000;
    let mut v = patterns::ascending(len);

    let stats = randomized::sort_with_stats(&mut v, &mut seeded_rng());

    assert_eq!(v, patterns::ascending(len));
    // Expected depth is a small multiple of log2(n), nowhere near n.
    assert!(stats.max_depth < 200, "depth {}", stats.max_depth);
    assert!(!stats.spilled);
}

#[test]
fn randomized_is_reproducible_for_fixed_seed() {
    for seed in [0, 1, 42, patterns::random_init_seed()] {
        let input = patterns::random(1_000);

        let mut a = input.clone();
        let mut calls_a = Vec::new();
        Quicksort::randomized(StdRng::seed_from_u64(seed)).sort_range_observed(
            &mut a,
            0,
            input.len() - 1,
            |call| calls_a.push(call),
        );

        let mut b = input.clone();
        let mut calls_b = Vec::new();
        Quicksort::randomized(StdRng::seed_from_u64(seed)).sort_range_observed(
            &mut b,
            0,
            input.len() - 1,
            |call| calls_b.push(call),
        );

        let mut expected = input.clone();
        expected.sort();
        assert_eq!(a, expected);
        assert_eq!(a, b);
        assert_eq!(calls_a, calls_b);
    }
}

#[test]
fn sort_range_sorts_only_the_range() {
    let original = patterns::random(100);
    let mut expected = original.clone();
    expected[20..=79].sort();

    let mut det = original.clone();
    deterministic::sort_range(&mut det, 20, 79);
    assert_eq!(det, expected);

    let mut rand = original.clone();
    randomized::sort_range(&mut rand, 20, 79, &mut seeded_rng());
    assert_eq!(rand, expected);
}

#[test]
fn idempotent_on_sorted_output() {
    let mut v = patterns::random(1_000);
    deterministic::sort(&mut v);
    let sorted = v.clone();

    deterministic::sort(&mut v);
    assert_eq!(v, sorted);

    randomized::sort_with_rng(&mut v, &mut seeded_rng());
    assert_eq!(v, sorted);
}
