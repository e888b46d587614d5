//! Multi-trial aggregation
//! Runs one trial per seed in input order and summarizes the growth metric

pub mod runner;
pub mod stats;
pub mod types;

pub use runner::{aggregate, run_trial, TrialRunner};
pub use stats::{describe, Descriptive};
pub use types::{BatchReport, RunOutcome, SummaryStatistics};
