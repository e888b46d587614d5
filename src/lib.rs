//! APEX 3.0 Validation Harness
//!
//! Deterministic numeric validation: a fixed alpha-weighted mean transform
//! applied repeatedly to a seed vector, and a multi-seed aggregator that
//! summarizes trial performance.
//!
//! # Architecture
//!
//! - **engine**: transform + fixed-length convergence loop
//! - **trial**: simulator capability, seed-scoped RNG, result records
//! - **aggregate**: sequential per-seed execution and summary statistics
//! - **suite / report / doctor**: quick-start suite, persistence, preflight

pub mod errors;
pub mod engine;
pub mod trial;
pub mod aggregate;
pub mod suite;

// Re-export commonly used types
pub use errors::{HarnessError, Result, TrialStage};
pub use engine::{apply_transform, iterate, ConvergenceResult, IterationRecord};
pub use trial::{Seed, Simulator, TestMode, TrialConfig, TrialResult};
pub use aggregate::{aggregate, run_trial, BatchReport, RunOutcome, SummaryStatistics};

// Outer layers: CLI, telemetry, persistence, preflight
pub mod cli;
pub mod telemetry;
pub mod report;
pub mod doctor;
