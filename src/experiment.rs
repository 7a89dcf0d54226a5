//! Timing harness comparing the two quicksort variants over a grid of input sizes and
//! distributions.

use std::fmt;
use std::fs;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sort_test_tools::patterns;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::quicksort::{Quicksort, SortStats, DEFAULT_RECURSION_LIMIT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform integers in `[0, 10 * len]`.
    Random,
    Sorted,
    Reverse,
    /// Ascending with `max(1, len / 10)` random transpositions.
    NearlySorted,
    /// Uniform integers in `[0, len / 10]`.
    Duplicates,
}

impl Distribution {
    pub const ALL: [Distribution; 5] = [
        Distribution::Random,
        Distribution::Sorted,
        Distribution::Reverse,
        Distribution::NearlySorted,
        Distribution::Duplicates,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Sorted => "sorted",
            Distribution::Reverse => "reverse",
            Distribution::NearlySorted => "nearly_sorted",
            Distribution::Duplicates => "duplicates",
        }
    }

    pub fn generate<R: Rng + ?Sized>(self, len: usize, rng: &mut R) -> Vec<i64> {
        match self {
            Distribution::Random => patterns::random_uniform(len, 0..=(len as i64 * 10), rng),
            Distribution::Sorted => patterns::ascending(len),
            Distribution::Reverse => patterns::descending(len),
            Distribution::NearlySorted => patterns::nearly_sorted_with(len, rng),
            Distribution::Duplicates => patterns::random_uniform(len, 0..=(len as i64 / 10), rng),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Distribution::ALL
            .into_iter()
            .find(|dist| dist.name() == normalized)
            .ok_or_else(|| {
                let known = Distribution::ALL.map(Distribution::name).join(", ");
                format!("unknown distribution `{s}`, expected one of: {known}")
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Deterministic,
    Randomized,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Deterministic, Algorithm::Randomized];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Deterministic => "Deterministic",
            Algorithm::Randomized => "Randomized",
        }
    }

    /// Sorts `v` in place with this variant. `rng` is only drawn from by the randomized variant.
    pub fn sort<T, R>(self, v: &mut [T], rng: &mut R, recursion_limit: usize) -> SortStats
    where
        T: Ord,
        R: Rng + ?Sized,
    {
        match self {
            Algorithm::Deterministic => Quicksort::deterministic()
                .with_recursion_limit(recursion_limit)
                .sort(v),
            Algorithm::Randomized => Quicksort::randomized(rng)
                .with_recursion_limit(recursion_limit)
                .sort(v),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Input sizes, in the order they are run.
    pub sizes: Vec<usize>,
    pub distributions: Vec<Distribution>,
    /// Trials per (size, distribution), averaged. Every trial sorts freshly generated input.
    pub trials: usize,
    /// Defaults to the process wide seed of `sort_test_tools::patterns`.
    pub seed: Option<u64>,
    /// See [`Quicksort::with_recursion_limit`].
    pub recursion_limit: usize,
    /// Pin the benchmark thread to this core before timing.
    pub pin_core: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![500, 1_000, 2_000, 5_000, 8_000, 10_000],
            distributions: vec![
                Distribution::Random,
                Distribution::Sorted,
                Distribution::Reverse,
            ],
            trials: 3,
            seed: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            pin_core: None,
        }
    }
}

impl BenchConfig {
    /// Reads a JSON config. Missing fields keep their default value.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::InvalidConfig("trials must be at least 1".into()));
        }
        if self.sizes.is_empty() {
            return Err(Error::InvalidConfig("no input sizes configured".into()));
        }
        if self.distributions.is_empty() {
            return Err(Error::InvalidConfig("no distributions configured".into()));
        }

        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(patterns::random_init_seed)
    }
}

/// Timing of a single sort run. `elapsed` is `None` if the trial aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialResult {
    pub size: usize,
    pub distribution: Distribution,
    pub algorithm: Algorithm,
    pub elapsed: Option<Duration>,
}

/// Mean over all completed trials of one (size, distribution, algorithm) triple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub size: usize,
    pub distribution: Distribution,
    pub algorithm: Algorithm,
    /// `None` if no trial completed.
    pub mean_seconds: Option<f64>,
    pub completed_trials: usize,
    pub failed_trials: usize,
}

/// Runs the whole grid and returns one record per (size, distribution, algorithm), ordered by
/// distribution, then size, then algorithm.
pub fn run_experiments(config: &BenchConfig) -> Result<Vec<ResultRecord>> {
    config.validate()?;

    let seed = config.seed();
    info!(
        seed,
        sizes = ?config.sizes,
        distributions = ?config.distributions,
        trials = config.trials,
        recursion_limit = config.recursion_limit,
        "running experiments"
    );

    if let Some(core) = config.pin_core {
        pin_to_core(core);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(
        config.distributions.len() * config.sizes.len() * Algorithm::ALL.len(),
    );

    for &distribution in &config.distributions {
        for &size in &config.sizes {
            let trials = run_trials(size, distribution, config, &mut rng);
            let row = aggregate(&trials);

            info!(
                size,
                %distribution,
                det = %format_mean(mean_of(&row, Algorithm::Deterministic)),
                rand = %format_mean(mean_of(&row, Algorithm::Randomized)),
                "row complete"
            );

            records.extend(row);
        }
    }

    Ok(records)
}

/// Runs all trials of one (size, distribution) pair. Each trial generates fresh input and every
/// algorithm sorts its own copy of it.
pub fn run_trials<R: Rng + ?Sized>(
    size: usize,
    distribution: Distribution,
    config: &BenchConfig,
    rng: &mut R,
) -> Vec<TrialResult> {
    run_trials_with(size, distribution, config, rng, |algorithm, v, rng| {
        algorithm.sort(v, rng, config.recursion_limit)
    })
}

/// Like [`run_trials`], but every trial is sorted by `sort` instead of [`Algorithm::sort`].
pub fn run_trials_with<R, F>(
    size: usize,
    distribution: Distribution,
    config: &BenchConfig,
    rng: &mut R,
    mut sort: F,
) -> Vec<TrialResult>
where
    R: Rng + ?Sized,
    F: FnMut(Algorithm, &mut [i64], &mut R) -> SortStats,
{
    let mut results = Vec::with_capacity(config.trials * Algorithm::ALL.len());

    for trial in 0..config.trials {
        let input = distribution.generate(size, rng);

        for algorithm in Algorithm::ALL {
            let elapsed = time_trial(algorithm, &input, |v| sort(algorithm, v, rng));
            debug!(size, %distribution, %algorithm, trial, ?elapsed, "trial");

            results.push(TrialResult {
                size,
                distribution,
                algorithm,
                elapsed,
            });
        }
    }

    results
}

/// Times `sort` on a copy of `input`. A panic during the sort is caught and reported as a
/// missing data point.
pub fn time_trial<F>(algorithm: Algorithm, input: &[i64], sort: F) -> Option<Duration>
where
    F: FnOnce(&mut [i64]) -> SortStats,
{
    let mut v = input.to_vec();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let start = Instant::now();
        let stats = sort(&mut v);
        (start.elapsed(), stats)
    }));

    match outcome {
        Ok((elapsed, stats)) => {
            black_box(&v);
            if stats.spilled {
                warn!(
                    %algorithm,
                    len = input.len(),
                    max_depth = stats.max_depth,
                    "recursion limit reached, continued on work-list"
                );
            }
            Some(elapsed)
        }
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".into());
            warn!(%algorithm, len = input.len(), "trial aborted: {msg}");
            None
        }
    }
}

/// Averages trials per (size, distribution, algorithm). Records come out in the order their
/// triple first appears in `trials`.
pub fn aggregate(trials: &[TrialResult]) -> Vec<ResultRecord> {
    struct Acc {
        record: ResultRecord,
        total: Duration,
    }

    let mut accs: Vec<Acc> = Vec::new();

    for trial in trials {
        let pos = accs.iter().position(|acc| {
            acc.record.size == trial.size
                && acc.record.distribution == trial.distribution
                && acc.record.algorithm == trial.algorithm
        });

        let acc = match pos {
            Some(pos) => &mut accs[pos],
            None => {
                accs.push(Acc {
                    record: ResultRecord {
                        size: trial.size,
                        distribution: trial.distribution,
                        algorithm: trial.algorithm,
                        mean_seconds: None,
                        completed_trials: 0,
                        failed_trials: 0,
                    },
                    total: Duration::ZERO,
                });
                let last = accs.len() - 1;
                &mut accs[last]
            }
        };

        match trial.elapsed {
            Some(elapsed) => {
                acc.total += elapsed;
                acc.record.completed_trials += 1;
            }
            None => acc.record.failed_trials += 1,
        }
    }

    accs.into_iter()
        .map(|Acc { mut record, total }| {
            if record.completed_trials > 0 {
                record.mean_seconds =
                    Some(total.as_secs_f64() / record.completed_trials as f64);
            }
            record
        })
        .collect()
}

fn mean_of(records: &[ResultRecord], algorithm: Algorithm) -> Option<f64> {
    records
        .iter()
        .find(|record| record.algorithm == algorithm)
        .and_then(|record| record.mean_seconds)
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(secs) => format!("{secs:.6}s"),
        None => "N/A".into(),
    }
}

fn pin_to_core(core: usize) {
    let core_id = core_affinity::get_core_ids()
        .and_then(|ids| ids.into_iter().find(|id| id.id == core));

    match core_id {
        Some(core_id) if core_affinity::set_for_current(core_id) => {
            info!(core, "pinned benchmark thread");
        }
        _ => warn!(core, "failed to pin benchmark thread, continuing unpinned"),
    }
}
