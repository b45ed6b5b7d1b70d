// Input validation for probability distributions and joint tables.
//
// The metrics are only defined over real distributions, so every entry point
// checks its input here first. A distribution is non-empty, finite,
// non-negative and sums to 1 (within NORMALIZATION_TOLERANCE).

use thiserror::Error;

/// How far a distribution's sum may drift from 1.0 and still be accepted.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Errors raised when a metric is handed something that isn't a distribution,
/// or a pair of distributions the metric is undefined for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InformationError {
    #[error("distribution is empty")]
    Empty,

    #[error("probability at index {index} is not finite")]
    NonFinite { index: usize },

    #[error("probability at index {index} is negative: {value}")]
    Negative { index: usize, value: f64 },

    #[error("probabilities sum to {sum}, expected 1.0")]
    NotNormalized { sum: f64 },

    #[error("distributions differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("reference distribution assigns zero probability to outcome {index}, which p supports")]
    UnsupportedOutcome { index: usize },

    #[error("joint table row {row} has {found} columns, expected {expected}")]
    RaggedJoint {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Check that `p` is a probability distribution.
pub fn validate_distribution(p: &[f64]) -> Result<(), InformationError> {
    if p.is_empty() {
        return Err(InformationError::Empty);
    }
    check_entries(p.iter().copied())?;

    let sum: f64 = p.iter().sum();
    check_sum(sum)
}

/// Check that `joint` is a rectangular, normalized joint probability table.
///
/// Entry indices in errors are row-major positions in the flattened table.
pub fn validate_joint(joint: &[Vec<f64>]) -> Result<(), InformationError> {
    let width = joint.first().map(Vec::len).unwrap_or(0);
    if width == 0 {
        return Err(InformationError::Empty);
    }

    for (row, values) in joint.iter().enumerate() {
        if values.len() != width {
            return Err(InformationError::RaggedJoint {
                row,
                expected: width,
                found: values.len(),
            });
        }
    }

    check_entries(joint.iter().flatten().copied())?;

    let sum: f64 = joint.iter().flatten().sum();
    check_sum(sum)
}

fn check_entries(values: impl Iterator<Item = f64>) -> Result<(), InformationError> {
    for (index, value) in values.enumerate() {
        if !value.is_finite() {
            return Err(InformationError::NonFinite { index });
        }
        if value < 0.0 {
            return Err(InformationError::Negative { index, value });
        }
    }
    Ok(())
}

fn check_sum(sum: f64) -> Result<(), InformationError> {
    if (sum - 1.0).abs() > NORMALIZATION_TOLERANCE {
        return Err(InformationError::NotNormalized { sum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_distribution() {
        assert!(validate_distribution(&[0.5, 0.25, 0.125, 0.125]).is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(validate_distribution(&[]), Err(InformationError::Empty));
    }

    #[test]
    fn test_negative_rejected() {
        let err = validate_distribution(&[1.2, -0.2]).unwrap_err();
        assert_eq!(
            err,
            InformationError::Negative {
                index: 1,
                value: -0.2
            }
        );
    }

    #[test]
    fn test_nan_rejected() {
        let err = validate_distribution(&[0.5, f64::NAN]).unwrap_err();
        assert_eq!(err, InformationError::NonFinite { index: 1 });
    }

    #[test]
    fn test_unnormalized_rejected() {
        let err = validate_distribution(&[0.5, 0.4]).unwrap_err();
        assert!(matches!(err, InformationError::NotNormalized { .. }));
    }

    #[test]
    fn test_rounding_within_tolerance() {
        // 0.1 * 10 does not sum to exactly 1.0 in floating point
        assert!(validate_distribution(&[0.1; 10]).is_ok());
    }

    #[test]
    fn test_ragged_joint_rejected() {
        let joint = vec![vec![0.25, 0.25], vec![0.5]];
        let err = validate_joint(&joint).unwrap_err();
        assert_eq!(
            err,
            InformationError::RaggedJoint {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_empty_joint_rejected() {
        assert_eq!(validate_joint(&[]), Err(InformationError::Empty));
        assert_eq!(validate_joint(&[vec![]]), Err(InformationError::Empty));
    }
}
