//! Zero-guarded precision and recall from raw match counts.

use crate::metrics::f1_score::f1_score;
use crate::types::MatchCounts;

/// Zero-guarded ratio of matched to total pixels.
///
/// Computes `count / (sum + (sum == 0))`: when `sum` is exactly zero the
/// denominator becomes 1 and the ratio is defined as 0 instead of NaN. A zero
/// denominator is a normal outcome (an empty map), not an error.
///
/// # Example
///
/// ```
/// use boundary_eval::metrics::ratio;
///
/// assert_eq!(ratio(8, 10), 0.8);
/// assert_eq!(ratio(0, 0), 0.0);
/// ```
#[must_use]
pub fn ratio(count: u64, sum: u64) -> f64 {
    let denominator = sum + u64::from(sum == 0);

    #[allow(clippy::cast_precision_loss)]
    let value = count as f64 / denominator as f64;

    debug_assert!(
        (0.0..=1.0).contains(&value) || count > sum,
        "ratio must be in [0,1] when count <= sum, got {value}"
    );

    value
}

/// Recall, precision and F1 for one set of match counts.
///
/// Recall is `count_r / sum_r`, precision is `count_p / sum_p`, both
/// zero-guarded; F1 is their zero-guarded harmonic mean.
///
/// # Example
///
/// ```
/// use boundary_eval::metrics::rec_prec_f1;
/// use boundary_eval::types::MatchCounts;
///
/// let counts = MatchCounts { count_r: 8, sum_r: 10, count_p: 9, sum_p: 10 };
/// let (recall, precision, f1) = rec_prec_f1(&counts);
/// assert_eq!(recall, 0.8);
/// assert_eq!(precision, 0.9);
/// assert!((f1 - 0.847).abs() < 0.001);
/// ```
#[must_use]
pub fn rec_prec_f1(counts: &MatchCounts) -> (f64, f64, f64) {
    let recall = ratio(counts.count_r, counts.sum_r);
    let precision = ratio(counts.count_p, counts.sum_p);
    let f1 = f1_score(precision, recall);
    (recall, precision, f1)
}

/// Element-wise `rec_prec_f1` over a per-threshold count vector.
#[must_use]
pub fn rec_prec_f1_curve(counts: &[MatchCounts]) -> Vec<(f64, f64, f64)> {
    counts.iter().map(rec_prec_f1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_typical() {
        assert_eq!(ratio(80, 100), 0.8);
    }

    #[test]
    fn test_ratio_perfect() {
        assert_eq!(ratio(100, 100), 1.0);
    }

    #[test]
    fn test_ratio_zero_sum_is_zero_not_nan() {
        let r = ratio(0, 0);
        assert_eq!(r, 0.0);
        assert!(!r.is_nan());
    }

    #[test]
    fn test_rec_prec_f1_all_zero() {
        let (recall, precision, f1) = rec_prec_f1(&MatchCounts::default());
        assert_eq!((recall, precision, f1), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rec_prec_f1_perfect() {
        let counts = MatchCounts {
            count_r: 5,
            sum_r: 5,
            count_p: 5,
            sum_p: 5,
        };
        let (recall, precision, f1) = rec_prec_f1(&counts);
        assert_eq!(recall, 1.0);
        assert_eq!(precision, 1.0);
        assert!((f1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_curve_is_elementwise() {
        let counts = vec![
            MatchCounts {
                count_r: 1,
                sum_r: 2,
                count_p: 1,
                sum_p: 1,
            },
            MatchCounts::default(),
        ];
        let curve = rec_prec_f1_curve(&counts);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].0, 0.5);
        assert_eq!(curve[1], (0.0, 0.0, 0.0));
    }
}
