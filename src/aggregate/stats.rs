//! Descriptive statistics over collected trial metrics

use serde::{Deserialize, Serialize};

use crate::errors::{HarnessError, Result};

/// Mean, population standard deviation and range of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize a non-empty sample.
///
/// Uses the population formula `sqrt(sum((x - mean)^2) / n)` for every
/// sample size, so a single value has zero spread.
pub fn describe(values: &[f64]) -> Result<Descriptive> {
    if values.is_empty() {
        return Err(HarnessError::invalid_input(
            "cannot summarize an empty sample",
        ));
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(Descriptive {
        count: values.len(),
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let d = describe(&[12.5]).unwrap();
        assert_eq!(d.count, 1);
        assert_eq!(d.mean, 12.5);
        assert_eq!(d.std_dev, 0.0);
        assert_eq!(d.min, 12.5);
        assert_eq!(d.max, 12.5);
    }

    #[test]
    fn test_population_std() {
        // Classic example: population std of this sample is exactly 2
        let d = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((d.mean - 5.0).abs() < 1e-12);
        assert!((d.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(d.min, 2.0);
        assert_eq!(d.max, 9.0);
    }

    #[test]
    fn test_negative_values() {
        let d = describe(&[-3.0, -1.0]).unwrap();
        assert_eq!(d.mean, -2.0);
        assert_eq!(d.std_dev, 1.0);
        assert_eq!(d.min, -3.0);
        assert_eq!(d.max, -1.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            describe(&[]),
            Err(HarnessError::InvalidInput { .. })
        ));
    }
}
