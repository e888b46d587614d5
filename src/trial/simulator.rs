//! Simulators: the capability that turns a seed into a trial result

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{apply_transform, iterate, l2_distance, mean};
use crate::errors::{HarnessError, Result};
use crate::trial::rng::seeded_rng;
use crate::trial::types::{Performance, Seed, TrialConfig, TrialResult, TrialStatus};

/// Step distance at or below which a convergence trial counts as converged
pub const CONVERGENCE_FLOOR: f64 = 1e-9;

/// Default length of seed-derived vectors
pub const DEFAULT_DIMENSION: usize = 5;

/// Anything that can run one deterministic trial per seed.
///
/// Implementations must return bit-identical results for the same
/// `(seed, config)` pair and must not share mutable state across seeds.
pub trait Simulator {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one trial
    fn run(&self, seed: Seed, config: &TrialConfig) -> Result<TrialResult>;
}

impl<F> Simulator for F
where
    F: Fn(Seed, &TrialConfig) -> Result<TrialResult>,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn run(&self, seed: Seed, config: &TrialConfig) -> Result<TrialResult> {
        self(seed, config)
    }
}

fn check_dimension(dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(HarnessError::invalid_input(
            "vector dimension must be greater than 0",
        ));
    }
    Ok(())
}

/// Runs the convergence engine on a seed-derived vector
#[derive(Debug, Clone)]
pub struct ConvergenceTrial {
    dimension: usize,
    alpha: Option<f64>,
}

impl ConvergenceTrial {
    /// Create a trial with the default dimension and the mode's alpha
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            alpha: None,
        }
    }

    /// Override the vector length
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Override the blend coefficient instead of using the mode profile
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

impl Default for ConvergenceTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for ConvergenceTrial {
    fn name(&self) -> &str {
        "convergence"
    }

    fn run(&self, seed: Seed, config: &TrialConfig) -> Result<TrialResult> {
        config.validate()?;
        check_dimension(self.dimension)?;

        let mut rng = seeded_rng(seed);
        let initial: Vec<f64> = (0..self.dimension)
            .map(|_| rng.gen_range(1.0..10.0))
            .collect();

        let alpha = self.alpha.unwrap_or(config.test_mode.profile().alpha);
        let result = iterate(&initial, config.cycle_count as usize, alpha)?;

        let first = result.first_metric().unwrap_or(0.0);
        let last = result.last_metric().unwrap_or(0.0);

        // Percentage by which the step distance contracted
        let growth_percent = if first > 0.0 {
            (1.0 - last / first) * 100.0
        } else {
            0.0
        };

        let status = if last <= CONVERGENCE_FLOOR {
            TrialStatus::Converged
        } else {
            TrialStatus::Converging
        };

        Ok(TrialResult {
            seed,
            test_mode: config.test_mode,
            cycle_count: config.cycle_count,
            performance: Performance {
                initial_state: first,
                final_state: last,
                growth_percent,
                status,
            },
            final_metric: last,
            checksum: result.checksum,
        })
    }
}

/// Stand-in for the compiled APEX simulation module.
///
/// Each cycle blends the state vector toward its mean and then applies
/// seeded multiplicative noise plus the mode's drift. The tracked state is
/// the vector mean.
#[derive(Debug, Clone)]
pub struct DriftSimulator {
    dimension: usize,
}

impl DriftSimulator {
    /// Create a simulator with the default dimension
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Override the state vector length
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

impl Default for DriftSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for DriftSimulator {
    fn name(&self) -> &str {
        "drift"
    }

    fn run(&self, seed: Seed, config: &TrialConfig) -> Result<TrialResult> {
        config.validate()?;
        check_dimension(self.dimension)?;

        let profile = config.test_mode.profile();
        let mut rng = seeded_rng(seed);

        let mut current: Vec<f64> = (0..self.dimension)
            .map(|_| rng.gen_range(0.5..1.5))
            .collect();
        let initial_state = mean(&current)?;
        let mut last_metric = 0.0;

        for _ in 0..config.cycle_count {
            let mut next = apply_transform(&current, profile.alpha)?;
            for x in next.iter_mut() {
                let shock = rng.gen_range(-profile.volatility..profile.volatility);
                *x *= 1.0 + profile.drift + shock;
            }
            last_metric = l2_distance(&next, &current)?;
            current = next;
        }

        let final_state = mean(&current)?;
        let growth_percent = if initial_state != 0.0 {
            (final_state - initial_state) / initial_state.abs() * 100.0
        } else {
            0.0
        };

        Ok(TrialResult {
            seed,
            test_mode: config.test_mode,
            cycle_count: config.cycle_count,
            performance: Performance {
                initial_state,
                final_state,
                growth_percent,
                status: TrialStatus::from_growth(growth_percent),
            },
            final_metric: last_metric,
            checksum: current.iter().sum(),
        })
    }
}

/// Selectable simulator implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorKind {
    /// Convergence engine on a seed-derived vector
    Convergence,

    /// Noisy drift model standing in for the compiled module
    Drift,
}

impl SimulatorKind {
    /// Build the simulator with the given vector dimension.
    ///
    /// `alpha` overrides the mode profile's blend coefficient for the
    /// convergence trial; the drift model always follows its profile.
    pub fn build(&self, dimension: usize, alpha: Option<f64>) -> Box<dyn Simulator> {
        match self {
            SimulatorKind::Convergence => {
                let trial = ConvergenceTrial::new().with_dimension(dimension);
                match alpha {
                    Some(alpha) => Box::new(trial.with_alpha(alpha)),
                    None => Box::new(trial),
                }
            }
            SimulatorKind::Drift => Box::new(DriftSimulator::new().with_dimension(dimension)),
        }
    }

    /// String label
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulatorKind::Convergence => "convergence",
            SimulatorKind::Drift => "drift",
        }
    }
}

impl Default for SimulatorKind {
    fn default() -> Self {
        SimulatorKind::Drift
    }
}
