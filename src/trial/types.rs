//! Trial type definitions

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{HarnessError, Result};

/// Identifier of one independent, reproducible trial
pub type Seed = i64;

/// Test mode label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TestMode {
    /// Standard run
    #[serde(rename = "phase_1f")]
    #[value(name = "phase_1f")]
    Phase1F,

    /// Stress test
    #[serde(rename = "phase_1g_aggressive")]
    #[value(name = "phase_1g_aggressive")]
    Phase1GAggressive,

    /// Ceiling search
    #[serde(rename = "phase_1h_extremes")]
    #[value(name = "phase_1h_extremes")]
    Phase1HExtremes,
}

/// Numeric knobs associated with a test mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    /// Blend coefficient handed to the transform
    pub alpha: f64,

    /// Half-width of the per-cycle multiplicative noise
    pub volatility: f64,

    /// Deterministic per-cycle growth factor
    pub drift: f64,
}

impl TestMode {
    /// String label as used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TestMode::Phase1F => "phase_1f",
            TestMode::Phase1GAggressive => "phase_1g_aggressive",
            TestMode::Phase1HExtremes => "phase_1h_extremes",
        }
    }

    /// Numeric profile for this mode
    pub fn profile(&self) -> ModeProfile {
        match self {
            TestMode::Phase1F => ModeProfile {
                alpha: 0.618,
                volatility: 0.002,
                drift: 0.0001,
            },
            TestMode::Phase1GAggressive => ModeProfile {
                alpha: 0.382,
                volatility: 0.005,
                drift: 0.00025,
            },
            TestMode::Phase1HExtremes => ModeProfile {
                alpha: 0.236,
                volatility: 0.01,
                drift: 0.0005,
            },
        }
    }
}

impl Default for TestMode {
    fn default() -> Self {
        TestMode::Phase1F
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration value object handed to every trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    pub test_mode: TestMode,
    pub cycle_count: u32,
}

impl TrialConfig {
    /// Create a validated trial configuration
    pub fn new(test_mode: TestMode, cycle_count: u32) -> Result<Self> {
        let config = Self {
            test_mode,
            cycle_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject non-positive cycle counts
    pub fn validate(&self) -> Result<()> {
        if self.cycle_count == 0 {
            return Err(HarnessError::invalid_input(
                "cycle_count must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            test_mode: TestMode::default(),
            cycle_count: 2000,
        }
    }
}

/// Terminal classification of a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    /// Step distance fell to the convergence floor
    Converged,

    /// Still contracting when the cycle budget ran out
    Converging,

    /// State value ended above its start
    Growing,

    /// State value ended below its start
    Declining,

    /// State value unchanged
    Stable,
}

impl TrialStatus {
    /// Classify a growth percentage
    pub fn from_growth(growth_percent: f64) -> Self {
        if growth_percent > 0.0 {
            TrialStatus::Growing
        } else if growth_percent < 0.0 {
            TrialStatus::Declining
        } else {
            TrialStatus::Stable
        }
    }
}

/// Performance block of a trial result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// State value before the first cycle
    pub initial_state: f64,

    /// State value after the last cycle
    pub final_state: f64,

    /// Scalar metric collected by the aggregator
    pub growth_percent: f64,

    pub status: TrialStatus,
}

/// Result of one trial, owned by its seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub seed: Seed,
    pub test_mode: TestMode,
    pub cycle_count: u32,
    pub performance: Performance,

    /// Step distance of the last cycle
    pub final_metric: f64,

    /// Sum of the final state vector
    pub checksum: f64,
}

impl TrialResult {
    /// The scalar the aggregator collects
    pub fn growth_percent(&self) -> f64 {
        self.performance.growth_percent
    }
}
