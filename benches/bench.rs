use std::env;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sort_test_tools::patterns;

use quicksort_study::experiment::{Algorithm, Distribution};
use quicksort_study::DEFAULT_RECURSION_LIMIT;

const BENCH_SIZES: [usize; 6] = [500, 1_000, 2_000, 5_000, 8_000, 10_000];

// Set BENCH_DISTRIBUTIONS=random,sorted to restrict the run.
fn bench_distributions() -> Vec<Distribution> {
    match env::var("BENCH_DISTRIBUTIONS") {
        Ok(list) => list
            .split(',')
            .map(|name| name.parse().unwrap_or_else(|err: String| panic!("{err}")))
            .collect(),
        Err(_) => vec![
            Distribution::Random,
            Distribution::Sorted,
            Distribution::Reverse,
        ],
    }
}

fn bench_sorts(c: &mut Criterion) {
    let seed = patterns::random_init_seed();
    println!("Seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    for distribution in bench_distributions() {
        let mut group = c.benchmark_group(distribution.name());

        for size in BENCH_SIZES {
            group.throughput(Throughput::Elements(size as u64));
            let input = distribution.generate(size, &mut rng);

            for algorithm in Algorithm::ALL {
                group.bench_with_input(
                    BenchmarkId::new(algorithm.name(), size),
                    &input,
                    |b, input| {
                        b.iter_batched_ref(
                            || input.clone(),
                            |v| {
                                algorithm.sort(
                                    black_box(v.as_mut_slice()),
                                    &mut rng,
                                    DEFAULT_RECURSION_LIMIT,
                                )
                            },
                            BatchSize::LargeInput,
                        )
                    },
                );
            }
        }

        group.finish();
    }
}

criterion_group!(benches, bench_sorts);
criterion_main!(benches);
