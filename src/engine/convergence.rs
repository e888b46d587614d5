//! Fixed-length iteration loop over the transform

use crate::engine::transform::{apply_transform, l2_distance};
use crate::engine::types::{ConvergenceResult, IterationRecord};
use crate::errors::{HarnessError, Result};

/// Default number of transform applications
pub const DEFAULT_ITERATIONS: usize = 3;

/// Apply the transform `iterations` times starting from `initial`.
///
/// Always runs every step; there is no tolerance-based early exit. Each
/// step feeds the freshly transformed vector into the next one.
pub fn iterate(initial: &[f64], iterations: usize, alpha: f64) -> Result<ConvergenceResult> {
    if iterations == 0 {
        return Err(HarnessError::invalid_input(
            "iteration count must be positive",
        ));
    }

    let mut records = Vec::with_capacity(iterations);
    let mut current = initial.to_vec();

    for step in 1..=iterations {
        let transformed = apply_transform(&current, alpha)?;
        let convergence_metric = l2_distance(&transformed, &current)?;

        records.push(IterationRecord {
            step,
            convergence_metric,
        });

        current = transformed;
    }

    Ok(ConvergenceResult::new(records, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transform::DEFAULT_ALPHA;

    const REFERENCE: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn test_exact_record_count() {
        let result = iterate(&REFERENCE, DEFAULT_ITERATIONS, DEFAULT_ALPHA).unwrap();
        assert_eq!(result.iterations(), 3);
        let steps: Vec<usize> = result.records.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn test_reference_checksum() {
        let result = iterate(&REFERENCE, 3, DEFAULT_ALPHA).unwrap();
        assert!((result.checksum - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_metrics() {
        // Deviations from the mean shrink by alpha every step
        let result = iterate(&REFERENCE, 3, DEFAULT_ALPHA).unwrap();
        let base = (1.0 - DEFAULT_ALPHA) * 10.0_f64.sqrt();
        let expected = [base, base * DEFAULT_ALPHA, base * DEFAULT_ALPHA * DEFAULT_ALPHA];
        for (got, want) in result.metrics().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_no_early_exit_on_fixed_point() {
        let result = iterate(&[4.0; 6], 25, DEFAULT_ALPHA).unwrap();
        assert_eq!(result.iterations(), 25);
        assert!(result.metrics().iter().all(|&m| m == 0.0));
        assert_eq!(result.final_vector, vec![4.0; 6]);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = iterate(&REFERENCE, 0, DEFAULT_ALPHA).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_vector_propagates() {
        let err = iterate(&[], 3, DEFAULT_ALPHA).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput { .. }));
    }

    #[test]
    fn test_input_not_mutated() {
        let input = REFERENCE.to_vec();
        let _ = iterate(&input, 5, 0.5).unwrap();
        assert_eq!(input, REFERENCE.to_vec());
    }
}
