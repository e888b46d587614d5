//! Error types for the APEX validation harness
//!
//! Every failure carries enough context (seed, stage) for the caller to
//! diagnose it. Nothing in the core retries or degrades.

use std::fmt;
use thiserror::Error;

/// Stage of a single trial at which a failure surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialStage {
    /// The simulator itself raised
    Simulation,

    /// The performance metric could not be extracted from the result
    MetricExtraction,
}

impl fmt::Display for TrialStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialStage::Simulation => write!(f, "simulation"),
            TrialStage::MetricExtraction => write!(f, "metric extraction"),
        }
    }
}

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Malformed vector or non-positive iteration/seed-count configuration
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A trial failed; aborts the whole batch
    #[error("Trial for seed {seed} failed during {stage}")]
    TrialExecution {
        seed: i64,
        stage: TrialStage,
        #[source]
        source: Box<HarnessError>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("Harness error: {0}")]
    Generic(String),
}

impl HarnessError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        HarnessError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Seed of the failing trial, if this is a trial failure
    pub fn seed(&self) -> Option<i64> {
        match self {
            HarnessError::TrialExecution { seed, .. } => Some(*seed),
            _ => None,
        }
    }
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Convert anyhow errors to HarnessError
impl From<anyhow::Error> for HarnessError {
    fn from(err: anyhow::Error) -> Self {
        HarnessError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_input_display() {
        let err = HarnessError::invalid_input("vector is empty");
        assert!(err.to_string().contains("vector is empty"));
    }

    #[test]
    fn test_trial_execution_carries_context() {
        let err = HarnessError::TrialExecution {
            seed: -7,
            stage: TrialStage::Simulation,
            source: Box::new(HarnessError::Generic("boom".to_string())),
        };
        let msg = err.to_string();
        assert!(msg.contains("-7"));
        assert!(msg.contains("simulation"));
        assert_eq!(err.seed(), Some(-7));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_trial_execution_cause_printed_once() {
        let err = HarnessError::TrialExecution {
            seed: 3,
            stage: TrialStage::MetricExtraction,
            source: Box::new(HarnessError::Generic("boom".to_string())),
        };
        assert!(!err.to_string().contains("boom"));

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("boom").count(), 1);
    }

    #[test]
    fn test_seed_absent_for_other_errors() {
        let err = HarnessError::ConfigError("bad".to_string());
        assert_eq!(err.seed(), None);
    }
}
