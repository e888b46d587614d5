//! Command-line argument parsing for the APEX harness
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::trial::{Seed, SimulatorKind, TestMode};

/// APEX 3.0 - deterministic multi-seed validation runner
#[derive(Parser, Debug)]
#[command(name = "apex")]
#[command(version)]
#[command(about = "Deterministic convergence and multi-seed validation harness", long_about = None)]
pub struct Args {
    /// Single seed to test (default from config, 42 out of the box)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "seeds")]
    pub seed: Option<Seed>,

    /// Multiple seeds for validation (e.g. --seeds 42 123 456)
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    pub seeds: Option<Vec<Seed>>,

    /// Test mode
    #[arg(long, value_enum)]
    pub test_mode: Option<TestMode>,

    /// Number of cycles to run
    #[arg(long)]
    pub cycles: Option<u32>,

    /// Trial implementation to run
    #[arg(long, value_enum)]
    pub simulator: Option<SimulatorKind>,

    /// Output file for results (JSON)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the quick-start reference suite and save its results
    Validate {
        /// Where to write the suite results
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Package saved results for submission
    Submit {
        /// Results file to package
        #[arg(long)]
        results: Option<PathBuf>,

        /// Directory for the generated files
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Run preflight checks
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Reject option combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() {
            let run_flags = [
                ("--seed", self.seed.is_some()),
                ("--seeds", self.seeds.is_some()),
                ("--test-mode", self.test_mode.is_some()),
                ("--cycles", self.cycles.is_some()),
                ("--simulator", self.simulator.is_some()),
                ("--output", self.output.is_some()),
            ];
            if let Some((flag, _)) = run_flags.iter().find(|(_, set)| *set) {
                return Err(format!("Cannot combine {} with a subcommand.", flag));
            }
        }

        if let Some(0) = self.cycles {
            return Err("--cycles must be greater than 0.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the config file representation
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show per-trial events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should dump every trial result
    pub fn show_results(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}
