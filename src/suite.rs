//! Quick-start validation suite
//!
//! Runs the engine on the fixed reference vector. The checksum is the
//! fingerprint validators compare across machines.

use serde::{Deserialize, Serialize};

use crate::engine::{iterate, DEFAULT_ALPHA, DEFAULT_ITERATIONS};
use crate::errors::Result;

/// Input vector of the reference suite
pub const REFERENCE_INPUT: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Expected checksum of the reference suite
pub const REFERENCE_CHECKSUM: f64 = 15.0;

/// Allowed deviation from the reference checksum
pub const CHECKSUM_TOLERANCE: f64 = 1e-9;

/// Loop output in report shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteOutput {
    pub iterations: Vec<usize>,
    pub convergence_metrics: Vec<f64>,
    pub final_state: Vec<f64>,
}

/// Full suite report, the payload saved to `validation_output.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub input: Vec<f64>,
    pub output: SuiteOutput,
    pub checksum: f64,
}

impl SuiteReport {
    /// Whether the checksum matches the reference within tolerance
    pub fn matches_reference(&self) -> bool {
        (self.checksum - REFERENCE_CHECKSUM).abs() <= CHECKSUM_TOLERANCE
    }
}

/// Run the reference suite
pub fn run_validation_suite() -> Result<SuiteReport> {
    run_suite_on(&REFERENCE_INPUT, DEFAULT_ITERATIONS, DEFAULT_ALPHA)
}

/// Run the suite on an arbitrary vector
pub fn run_suite_on(input: &[f64], iterations: usize, alpha: f64) -> Result<SuiteReport> {
    let result = iterate(input, iterations, alpha)?;

    Ok(SuiteReport {
        input: input.to_vec(),
        output: SuiteOutput {
            iterations: result.records.iter().map(|r| r.step).collect(),
            convergence_metrics: result.metrics(),
            final_state: result.final_vector.clone(),
        },
        checksum: result.checksum,
    })
}
