//! Aggregation output types

use serde::{Deserialize, Serialize};

use crate::aggregate::stats::Descriptive;
use crate::trial::{Seed, TestMode, TrialResult};

/// Summary of the growth metric across one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub test_mode: TestMode,

    /// Number of trials, equal to `seeds.len()`
    pub num_seeds: usize,

    /// Input seeds, same order, repeats kept
    pub seeds: Vec<Seed>,

    #[serde(rename = "mean_growth")]
    pub mean: f64,

    #[serde(rename = "std_growth")]
    pub std_dev: f64,

    #[serde(rename = "min_growth")]
    pub min: f64,

    #[serde(rename = "max_growth")]
    pub max: f64,
}

impl SummaryStatistics {
    /// Assemble a summary from the seed list and computed statistics
    pub fn from_descriptive(test_mode: TestMode, seeds: Vec<Seed>, stats: Descriptive) -> Self {
        Self {
            test_mode,
            num_seeds: seeds.len(),
            seeds,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        }
    }
}

/// Summary plus every individual result, in input seed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: SummaryStatistics,
    pub individual_results: Vec<TrialResult>,
}

/// What a run hands back: one bare trial, or a summarized batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Single-seed invocation; no summary is computed
    Single(TrialResult),

    /// Multi-seed invocation
    Batch(BatchReport),
}

impl RunOutcome {
    /// Summary, present only for batches
    pub fn summary(&self) -> Option<&SummaryStatistics> {
        match self {
            RunOutcome::Single(_) => None,
            RunOutcome::Batch(report) => Some(&report.summary),
        }
    }

    /// All trial results in seed order
    pub fn results(&self) -> Vec<&TrialResult> {
        match self {
            RunOutcome::Single(result) => vec![result],
            RunOutcome::Batch(report) => report.individual_results.iter().collect(),
        }
    }
}
