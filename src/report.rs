//! Text and JSON output of benchmark results. Plotting happens elsewhere, from the JSON export.

use std::fmt::Write as _;
use std::io;

use serde::Serialize;

use crate::error::Result;
use crate::experiment::{Algorithm, Distribution, ResultRecord};

const TABLE_WIDTH: usize = 80;

/// `deterministic mean / randomized mean` for one (distribution, size) pair. Values above 1 mean
/// the randomized variant was faster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Speedup {
    pub distribution: Distribution,
    pub size: usize,
    pub ratio: Option<f64>,
}

fn mean(
    records: &[ResultRecord],
    distribution: Distribution,
    size: usize,
    algorithm: Algorithm,
) -> Option<f64> {
    records
        .iter()
        .find(|r| r.distribution == distribution && r.size == size && r.algorithm == algorithm)
        .and_then(|r| r.mean_seconds)
}

fn distinct<T: PartialEq + Copy>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// One row per size, a Det and a Rand column per distribution. Missing means show as `N/A`.
pub fn summary_table(records: &[ResultRecord]) -> String {
    let sizes = distinct(records.iter().map(|r| r.size));
    let distributions = distinct(records.iter().map(|r| r.distribution));

    let mut out = String::new();
    let rule = "=".repeat(TABLE_WIDTH);

    // Writing into a String can't fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "SUMMARY TABLE: Average Execution Times (seconds)");
    let _ = writeln!(out, "{rule}");

    let _ = write!(out, "{:<8}", "Size");
    for dist in &distributions {
        let _ = write!(out, "{:<22}", format!("|  {dist}"));
    }
    let _ = writeln!(out);

    let _ = write!(out, "{:8}", "");
    for _ in &distributions {
        let _ = write!(out, "{:>11}{:>11}", "|  Det", "Rand");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(TABLE_WIDTH));

    for &size in &sizes {
        let _ = write!(out, "{size:<8}");
        for &dist in &distributions {
            let det = format_cell(mean(records, dist, size, Algorithm::Deterministic));
            let rand = format_cell(mean(records, dist, size, Algorithm::Randomized));
            let _ = write!(out, "|  {det:>9} {rand:>9}");
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{rule}");

    out
}

fn format_cell(mean: Option<f64>) -> String {
    match mean {
        Some(secs) => format!("{secs:.5}"),
        None => "N/A".into(),
    }
}

/// Speedup per (distribution, size), in the order they appear in `records`. `None` if either
/// mean is missing or the randomized mean is zero.
pub fn speedups(records: &[ResultRecord]) -> Vec<Speedup> {
    let pairs = distinct(records.iter().map(|r| (r.distribution, r.size)));

    pairs
        .into_iter()
        .map(|(distribution, size)| {
            let det = mean(records, distribution, size, Algorithm::Deterministic);
            let rand = mean(records, distribution, size, Algorithm::Randomized);
            let ratio = match (det, rand) {
                (Some(det), Some(rand)) if rand > 0.0 => Some(det / rand),
                _ => None,
            };

            Speedup {
                distribution,
                size,
                ratio,
            }
        })
        .collect()
}

pub fn write_json<W: io::Write>(records: &[ResultRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}
