//! Input patterns for testing and benchmarking the sorts. Limited to `i64` values.

use std::env;
use std::ops::RangeInclusive;

use once_cell::sync::OnceCell;
use rand::prelude::*;
use rand::rngs::StdRng;

static SEED: OnceCell<u64> = OnceCell::new();

/// Returns the seed used for every pattern in this process.
///
/// The seed is random per process unless `OVERRIDE_SEED` is set, which allows reproducing a
/// failing run.
pub fn random_init_seed() -> u64 {
    *SEED.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .and_then(|seed| seed.parse().ok())
            .unwrap_or_else(|| thread_rng().gen())
    })
}

pub fn new_seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

// --- Generators with an explicit source of randomness ---

pub fn random_uniform<R: Rng + ?Sized>(
    len: usize,
    range: RangeInclusive<i64>,
    rng: &mut R,
) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// Ascending with `max(1, len / 10)` random transpositions.
pub fn nearly_sorted_with<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<i64> {
    let mut v = ascending(len);
    if len == 0 {
        return v;
    }

    for _ in 0..(len / 10).max(1) {
        let a = rng.gen_range(0..len);
        let b = rng.gen_range(0..len);
        v.swap(a, b);
    }

    v
}

// --- Seeded convenience patterns ---

/// Uniform values in `[0, 10 * len]`.
pub fn random(len: usize) -> Vec<i64> {
    random_uniform(len, 0..=(len as i64 * 10), &mut new_seeded_rng())
}

/// Uniform values in `[0, len / 10]`, so most values repeat.
pub fn random_duplicates(len: usize) -> Vec<i64> {
    random_uniform(len, 0..=(len as i64 / 10), &mut new_seeded_rng())
}

pub fn nearly_sorted(len: usize) -> Vec<i64> {
    nearly_sorted_with(len, &mut new_seeded_rng())
}

pub fn all_equal(len: usize) -> Vec<i64> {
    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i64> {
    (0..len as i64).collect()
}

pub fn descending(len: usize) -> Vec<i64> {
    (0..len as i64).rev().collect()
}
