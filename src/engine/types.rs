//! Engine type definitions

use serde::{Deserialize, Serialize};

/// One step of the iteration loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Step index (1-based)
    pub step: usize,

    /// Euclidean distance between the vector before and after this step
    pub convergence_metric: f64,
}

/// Outcome of a full iteration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceResult {
    /// Per-step records, ordered by step
    pub records: Vec<IterationRecord>,

    /// Vector after the last step
    pub final_vector: Vec<f64>,

    /// Sum of the final vector's components
    pub checksum: f64,
}

impl ConvergenceResult {
    /// Build a result from the loop output, computing the checksum
    pub fn new(records: Vec<IterationRecord>, final_vector: Vec<f64>) -> Self {
        let checksum = final_vector.iter().sum();
        Self {
            records,
            final_vector,
            checksum,
        }
    }

    /// Number of steps performed
    pub fn iterations(&self) -> usize {
        self.records.len()
    }

    /// Convergence metrics in step order
    pub fn metrics(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.convergence_metric).collect()
    }

    /// Metric of the first step
    pub fn first_metric(&self) -> Option<f64> {
        self.records.first().map(|r| r.convergence_metric)
    }

    /// Metric of the last step
    pub fn last_metric(&self) -> Option<f64> {
        self.records.last().map(|r| r.convergence_metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_component_sum() {
        let result = ConvergenceResult::new(Vec::new(), vec![1.5, 2.5, -1.0]);
        assert_eq!(result.checksum, 3.0);
        assert_eq!(result.iterations(), 0);
        assert_eq!(result.last_metric(), None);
    }

    #[test]
    fn test_metric_accessors() {
        let records = vec![
            IterationRecord { step: 1, convergence_metric: 0.5 },
            IterationRecord { step: 2, convergence_metric: 0.25 },
        ];
        let result = ConvergenceResult::new(records, vec![1.0]);
        assert_eq!(result.metrics(), vec![0.5, 0.25]);
        assert_eq!(result.first_metric(), Some(0.5));
        assert_eq!(result.last_metric(), Some(0.25));
    }
}
