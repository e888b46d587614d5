//! Trial capability: configuration, result records and simulators
//!
//! A trial is one deterministic run for one seed. The aggregator only ever
//! talks to the [`Simulator`] trait.

pub mod rng;
pub mod simulator;
pub mod types;

pub use rng::seeded_rng;
pub use simulator::{ConvergenceTrial, DriftSimulator, Simulator, SimulatorKind};
pub use types::{ModeProfile, Performance, Seed, TestMode, TrialConfig, TrialResult, TrialStatus};
