//! The alpha-weighted mean blend and its numeric helpers

use crate::errors::{HarnessError, Result};

/// Golden-ratio complement, the default blend coefficient
pub const DEFAULT_ALPHA: f64 = 0.618;

/// Arithmetic mean of a non-empty vector.
///
/// Accumulated as a running mean so that a uniform vector yields its
/// common value exactly.
pub fn mean(vector: &[f64]) -> Result<f64> {
    if vector.is_empty() {
        return Err(HarnessError::invalid_input(
            "cannot take the mean of an empty vector",
        ));
    }

    let mut running = 0.0;
    for (i, &x) in vector.iter().enumerate() {
        running += (x - running) / (i + 1) as f64;
    }
    Ok(running)
}

/// Euclidean distance between two vectors of equal length
pub fn l2_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(HarnessError::invalid_input(format!(
            "vector lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(HarnessError::invalid_input(format!(
            "alpha must lie in (0, 1), got {}",
            alpha
        )))
    }
}

/// Blend every element with the vector mean: `alpha * x + (1 - alpha) * mean`.
///
/// Written as `x + (1 - alpha) * (mean - x)` so elements equal to the mean
/// are returned bit-for-bit.
pub fn apply_transform(vector: &[f64], alpha: f64) -> Result<Vec<f64>> {
    check_alpha(alpha)?;
    let m = mean(vector)?;
    let pull = 1.0 - alpha;

    Ok(vector.iter().map(|&x| x + pull * (m - x)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_uniform_is_exact() {
        let v = vec![0.1; 7];
        assert_eq!(mean(&v).unwrap(), 0.1);
    }

    #[test]
    fn test_mean_empty_fails() {
        assert!(matches!(mean(&[]), Err(HarnessError::InvalidInput { .. })));
    }

    #[test]
    fn test_l2_distance() {
        let d = l2_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_l2_distance_length_mismatch() {
        assert!(l2_distance(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_apply_transform_values() {
        let out = apply_transform(&[1.0, 2.0, 3.0, 4.0, 5.0], DEFAULT_ALPHA).unwrap();
        let expected = [
            0.618 * 1.0 + 0.382 * 3.0,
            0.618 * 2.0 + 0.382 * 3.0,
            3.0,
            0.618 * 4.0 + 0.382 * 3.0,
            0.618 * 5.0 + 0.382 * 3.0,
        ];
        for (got, want) in out.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_apply_transform_preserves_length() {
        let out = apply_transform(&[9.0, -3.0, 0.5], 0.3).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_apply_transform_uniform_fixed_point() {
        let v = vec![2.7182818; 4];
        assert_eq!(apply_transform(&v, DEFAULT_ALPHA).unwrap(), v);
    }

    #[test]
    fn test_apply_transform_empty_fails() {
        let err = apply_transform(&[], DEFAULT_ALPHA).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput { .. }));
    }

    #[test]
    fn test_apply_transform_rejects_bad_alpha() {
        assert!(apply_transform(&[1.0, 2.0], 0.0).is_err());
        assert!(apply_transform(&[1.0, 2.0], 1.0).is_err());
        assert!(apply_transform(&[1.0, 2.0], f64::NAN).is_err());
    }
}
