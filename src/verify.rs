//! Correctness checks for both quicksort variants.
//!
//! A sort is correct on an input if its output is non-decreasing and holds the same multiset of
//! elements as the input. Any failure is a logic defect: it is reported once with the offending
//! input and never retried.

use std::fmt;

use rand::Rng;
use sort_test_tools::patterns;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::experiment::Algorithm;
use crate::quicksort::{SortStats, DEFAULT_RECURSION_LIMIT};

// Arrays up to this length are printed in full in diagnostics.
const PREVIEW_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// `output[index] > output[index + 1]`.
    NotSorted { index: usize },
    NotPermutation,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotSorted { index } => {
                write!(f, "element {index} is greater than its successor")
            }
            Violation::NotPermutation => f.write_str("output is not a permutation of the input"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "{algorithm} quicksort failed case `{case}`: {violation}\n  input:    {}\n  expected: {}\n  actual:   {}",
    preview(.input),
    preview(.expected),
    preview(.actual)
)]
pub struct VerifyError {
    pub case: String,
    pub algorithm: Algorithm,
    pub violation: Violation,
    pub input: Vec<i64>,
    pub expected: Vec<i64>,
    pub actual: Vec<i64>,
}

fn preview(v: &[i64]) -> String {
    if v.len() <= PREVIEW_LEN {
        format!("{v:?}")
    } else {
        format!("{:?} ... ({} elements)", &v[..16], v.len())
    }
}

/// Checks that `output` is non-decreasing and a permutation of `input`.
pub fn check_sorted_permutation(input: &[i64], output: &[i64]) -> Result<(), Violation> {
    if let Some(index) = output.windows(2).position(|w| w[0] > w[1]) {
        return Err(Violation::NotSorted { index });
    }

    // `output` is sorted, so it holds the same elements as `input` iff it equals sorted `input`.
    let mut expected = input.to_vec();
    expected.sort_unstable();
    if expected != output {
        return Err(Violation::NotPermutation);
    }

    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectnessCase {
    pub name: String,
    pub input: Vec<i64>,
}

impl CorrectnessCase {
    pub fn new(name: impl Into<String>, input: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Empty, single element, sorted, reverse sorted, random and duplicate heavy inputs.
pub fn representative_cases<R: Rng + ?Sized>(rng: &mut R) -> Vec<CorrectnessCase> {
    vec![
        CorrectnessCase::new("empty", Vec::new()),
        CorrectnessCase::new("single", vec![5]),
        CorrectnessCase::new("sorted", patterns::ascending(100)),
        CorrectnessCase::new("reverse_sorted", patterns::descending(100)),
        CorrectnessCase::new("random", patterns::random_uniform(100, -1_000..=1_000, rng)),
        CorrectnessCase::new("duplicates", patterns::random_uniform(100, 0..=9, rng)),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case: String,
    pub algorithm: Algorithm,
    pub len: usize,
    pub stats: SortStats,
}

/// Every check that passed, in the order they ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorrectnessReport {
    pub passed: Vec<CaseOutcome>,
}

/// Sorts a copy of every case with both variants. Stops at the first failure.
pub fn run_suite<R: Rng + ?Sized>(
    cases: &[CorrectnessCase],
    rng: &mut R,
) -> Result<CorrectnessReport, VerifyError> {
    let mut report = CorrectnessReport::default();

    for case in cases {
        for algorithm in Algorithm::ALL {
            let stats = check_case(&case.name, &case.input, algorithm, rng)?;
            info!(case = %case.name, %algorithm, len = case.input.len(), "PASS");

            report.passed.push(CaseOutcome {
                case: case.name.clone(),
                algorithm,
                len: case.input.len(),
                stats,
            });
        }
    }

    Ok(report)
}

/// Runs `rounds` checks of `algorithm` on random inputs of random size in `[0, max_size]` with
/// values in `[-10000, 10000]`. Returns the number of rounds run.
pub fn verify_random<R: Rng + ?Sized>(
    algorithm: Algorithm,
    rounds: usize,
    max_size: usize,
    rng: &mut R,
) -> Result<usize, VerifyError> {
    for round in 0..rounds {
        let size = rng.gen_range(0..=max_size);
        let input = patterns::random_uniform(size, -10_000..=10_000, rng);
        let name = format!("random round {} (size {size})", round + 1);

        check_case(&name, &input, algorithm, rng)?;
        debug!(%algorithm, round, size, "random round passed");
    }

    info!(%algorithm, rounds, "all random rounds passed");
    Ok(rounds)
}

fn check_case<R: Rng + ?Sized>(
    name: &str,
    input: &[i64],
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<SortStats, VerifyError> {
    let mut actual = input.to_vec();
    let stats = algorithm.sort(&mut actual, rng, DEFAULT_RECURSION_LIMIT);

    check_sorted_permutation(input, &actual).map_err(|violation| {
        let mut expected = input.to_vec();
        expected.sort_unstable();

        let err = VerifyError {
            case: name.to_string(),
            algorithm,
            violation,
            input: input.to_vec(),
            expected,
            actual,
        };
        error!("{err}");
        err
    })?;

    Ok(stats)
}
