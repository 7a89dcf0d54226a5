//! Deterministic (last-element pivot) and randomized (uniform pivot) in-place quicksort, plus the
//! harnesses used to check and time them against each other.

pub mod deterministic;
pub mod error;
pub mod experiment;
pub mod partition;
pub mod quicksort;
pub mod randomized;
pub mod report;
pub mod verify;

pub use error::{Error, Result};
pub use partition::partition;
pub use quicksort::{
    LastElement, PartitionCall, PivotPolicy, Quicksort, SortStats, UniformRandom,
    DEFAULT_RECURSION_LIMIT,
};
