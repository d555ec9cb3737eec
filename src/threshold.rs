//! Threshold specification and resolution.

use serde::{Deserialize, Serialize};

use crate::error::{BoundaryEvalError, Result};

/// Specification of the threshold sweep.
///
/// Either a count of evenly spaced interior points of `(0, 1)` or an explicit
/// sequence of values. An explicit sequence is consumed in index order; the
/// engine never re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    /// Generate `n` thresholds at `(i + 1) / (n + 1)` for `i = 0..n-1`.
    Count(usize),
    /// Use this explicit sequence of thresholds.
    Values(Vec<f64>),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        ThresholdSpec::Count(99)
    }
}

impl ThresholdSpec {
    /// Resolve the specification into a concrete threshold sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the count is zero, the sequence is empty, or the
    /// sequence contains a non-finite value.
    ///
    /// # Example
    ///
    /// ```
    /// use boundary_eval::threshold::ThresholdSpec;
    ///
    /// let thresholds = ThresholdSpec::Count(3).resolve().unwrap();
    /// assert_eq!(thresholds, vec![0.25, 0.5, 0.75]);
    /// ```
    pub fn resolve(&self) -> Result<Vec<f64>> {
        match self {
            ThresholdSpec::Count(0) => Err(BoundaryEvalError::InvalidThreshold(
                "threshold count must be greater than 0".to_string(),
            )),
            ThresholdSpec::Count(n) => {
                let step = 1.0 / (*n as f64 + 1.0);
                Ok((0..*n).map(|i| (i as f64 + 1.0) * step).collect())
            }
            ThresholdSpec::Values(values) => {
                if values.is_empty() {
                    return Err(BoundaryEvalError::InvalidThreshold(
                        "threshold sequence must not be empty".to_string(),
                    ));
                }
                if let Some(v) = values.iter().find(|v| !v.is_finite()) {
                    return Err(BoundaryEvalError::InvalidThreshold(format!(
                        "threshold sequence contains non-finite value {v}"
                    )));
                }
                Ok(values.clone())
            }
        }
    }

    /// Number of thresholds this specification resolves to.
    pub fn len(&self) -> usize {
        match self {
            ThresholdSpec::Count(n) => *n,
            ThresholdSpec::Values(values) => values.len(),
        }
    }

    /// True when the specification resolves to no thresholds.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_generates_interior_points() {
        let t = ThresholdSpec::Count(99).resolve().unwrap();
        assert_eq!(t.len(), 99);
        assert!((t[0] - 0.01).abs() < 1e-12);
        assert!((t[98] - 0.99).abs() < 1e-12);
        // evenly spaced
        for w in t.windows(2) {
            assert!((w[1] - w[0] - 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_count_single() {
        assert_eq!(ThresholdSpec::Count(1).resolve().unwrap(), vec![0.5]);
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(ThresholdSpec::Count(0).resolve().is_err());
    }

    #[test]
    fn test_explicit_sequence_kept_in_index_order() {
        let t = ThresholdSpec::Values(vec![0.9, 0.1, 0.5]).resolve().unwrap();
        assert_eq!(t, vec![0.9, 0.1, 0.5]);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(ThresholdSpec::Values(vec![]).resolve().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ThresholdSpec::Values(vec![0.5, f64::NAN]).resolve().is_err());
    }

    #[test]
    fn test_untagged_serde() {
        let spec: ThresholdSpec = serde_json::from_str("99").unwrap();
        assert_eq!(spec, ThresholdSpec::Count(99));
        let spec: ThresholdSpec = serde_json::from_str("[0.25, 0.5]").unwrap();
        assert_eq!(spec, ThresholdSpec::Values(vec![0.25, 0.5]));
    }
}
