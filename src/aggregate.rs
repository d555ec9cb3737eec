//! Cross-sample aggregation of sweep counts into dataset curves and the
//! ODS/OIS/AP summary.

use crate::error::{BoundaryEvalError, Result};
use crate::metrics::ap::average_precision;
use crate::metrics::precision_recall::rec_prec_f1;
use crate::types::{
    EvaluationResults, MatchCounts, OverallResult, SampleResult, SweepCounts, ThresholdResult,
};

/// Accumulates per-sample sweep counts into the dataset-level reduction.
///
/// Three running aggregates are maintained: the element-wise sum of the four
/// count vectors (the dataset curve), the pooled counts at each sample's own
/// best threshold (the OIS accumulator), and the per-sample best operating
/// points. [`CurveAccumulator::finalize`] turns them into the three
/// result-record collections.
#[derive(Debug, Clone)]
pub struct CurveAccumulator {
    thresholds: Vec<f64>,
    overall: Vec<MatchCounts>,
    best: MatchCounts,
    samples: Vec<SampleResult>,
}

impl CurveAccumulator {
    /// Create an accumulator for the given threshold sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if `thresholds` is empty.
    pub fn new(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(BoundaryEvalError::InvalidThreshold(
                "cannot aggregate over an empty threshold sequence".to_string(),
            ));
        }
        let n = thresholds.len();
        Ok(Self {
            thresholds,
            overall: vec![MatchCounts::default(); n],
            best: MatchCounts::default(),
            samples: Vec::new(),
        })
    }

    /// Fold one sample's sweep counts into the running aggregates.
    ///
    /// The sample's best threshold index is the first index attaining its
    /// maximum F1; that index's raw counts feed the OIS accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the sweep length disagrees with the accumulator's
    /// threshold sequence.
    pub fn add_sample(&mut self, sample_name: &str, sweep: &SweepCounts) -> Result<()> {
        if sweep.counts.len() != self.thresholds.len() {
            return Err(BoundaryEvalError::InvalidConfig(format!(
                "sample '{}' swept {} thresholds, expected {}",
                sample_name,
                sweep.counts.len(),
                self.thresholds.len()
            )));
        }

        for (total, counts) in self.overall.iter_mut().zip(sweep.counts.iter()) {
            total.merge(counts);
        }

        let (best_index, best_point) = best_f1_index(&sweep.counts);
        self.best.merge(&sweep.counts[best_index]);
        self.samples.push(SampleResult {
            sample_name: sample_name.to_string(),
            threshold: self.thresholds[best_index],
            recall: best_point.0,
            precision: best_point.1,
            f1: best_point.2,
        });
        Ok(())
    }

    /// Produce the per-threshold curve, the ODS/OIS/AP summary and the
    /// per-sample results collected so far.
    pub fn finalize(self) -> EvaluationResults {
        let threshold_results: Vec<ThresholdResult> = self
            .thresholds
            .iter()
            .zip(self.overall.iter())
            .map(|(&threshold, counts)| {
                let (recall, precision, f1) = rec_prec_f1(counts);
                ThresholdResult {
                    threshold,
                    recall,
                    precision,
                    f1,
                }
            })
            .collect();

        let (ods_index, _) = best_f1_index(&self.overall);
        let ods = &threshold_results[ods_index];

        let (best_recall, best_precision, best_f1) = rec_prec_f1(&self.best);

        let recalls: Vec<f64> = threshold_results.iter().map(|r| r.recall).collect();
        let precisions: Vec<f64> = threshold_results.iter().map(|r| r.precision).collect();
        let area_pr = average_precision(&recalls, &precisions);

        let overall = OverallResult {
            threshold: ods.threshold,
            recall: ods.recall,
            precision: ods.precision,
            f1: ods.f1,
            best_recall,
            best_precision,
            best_f1,
            area_pr,
        };

        EvaluationResults {
            sample_results: self.samples,
            threshold_results,
            overall,
        }
    }
}

/// Index of the maximum F1 over a count vector, first index winning ties,
/// together with the (recall, precision, f1) triple at that index.
fn best_f1_index(counts: &[MatchCounts]) -> (usize, (f64, f64, f64)) {
    let mut best_index = 0;
    let mut best_point = (0.0, 0.0, -1.0);
    for (i, c) in counts.iter().enumerate() {
        let point = rec_prec_f1(c);
        if point.2 > best_point.2 {
            best_point = point;
            best_index = i;
        }
    }
    (best_index, best_point)
}

/// Aggregate a batch of per-sample sweeps into the final result records.
///
/// `sample_names` and `sample_data` are positionally aligned, as produced by
/// the dispatcher.
pub fn aggregate_samples(
    sample_names: &[String],
    sample_data: &[SweepCounts],
    thresholds: Vec<f64>,
) -> Result<EvaluationResults> {
    let mut accumulator = CurveAccumulator::new(thresholds)?;
    for (name, sweep) in sample_names.iter().zip(sample_data.iter()) {
        accumulator.add_sample(name, sweep)?;
    }
    Ok(accumulator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(thresholds: &[f64], counts: Vec<MatchCounts>) -> SweepCounts {
        SweepCounts {
            thresholds: thresholds.to_vec(),
            counts,
        }
    }

    fn counts(count_r: u64, sum_r: u64, count_p: u64, sum_p: u64) -> MatchCounts {
        MatchCounts {
            count_r,
            sum_r,
            count_p,
            sum_p,
        }
    }

    #[test]
    fn test_overall_curve_sums_counts_not_ratios() {
        let thresholds = vec![0.5];
        let mut acc = CurveAccumulator::new(thresholds.clone()).unwrap();
        // sample A: 1/1 recall on a tiny image; sample B: 0/9 on a big one
        acc.add_sample("a", &sweep(&thresholds, vec![counts(1, 1, 1, 1)]))
            .unwrap();
        acc.add_sample("b", &sweep(&thresholds, vec![counts(0, 9, 0, 0)]))
            .unwrap();
        let results = acc.finalize();
        // pooled counts: 1 matched of 10 -> 0.1, not the ratio mean 0.5
        assert!((results.threshold_results[0].recall - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_ods_first_index_tie_break() {
        let thresholds = vec![0.25, 0.5, 0.75];
        let mut acc = CurveAccumulator::new(thresholds.clone()).unwrap();
        // identical counts at every threshold: the tie must break to index 0
        acc.add_sample(
            "a",
            &sweep(
                &thresholds,
                vec![counts(1, 2, 1, 2), counts(1, 2, 1, 2), counts(1, 2, 1, 2)],
            ),
        )
        .unwrap();
        let results = acc.finalize();
        assert_eq!(results.overall.threshold, 0.25);
        assert_eq!(results.sample_results[0].threshold, 0.25);
    }

    #[test]
    fn test_ods_is_curve_maximum() {
        let thresholds = vec![0.25, 0.5, 0.75];
        let mut acc = CurveAccumulator::new(thresholds.clone()).unwrap();
        acc.add_sample(
            "a",
            &sweep(
                &thresholds,
                vec![counts(1, 4, 1, 4), counts(3, 4, 3, 4), counts(2, 4, 2, 4)],
            ),
        )
        .unwrap();
        let results = acc.finalize();
        assert_eq!(results.overall.threshold, 0.5);
        for r in &results.threshold_results {
            assert!(r.f1 <= results.overall.f1 + 1e-12);
        }
    }

    #[test]
    fn test_ois_pools_best_counts_across_samples() {
        let thresholds = vec![0.25, 0.75];
        let mut acc = CurveAccumulator::new(thresholds.clone()).unwrap();
        // sample A peaks at index 0, sample B at index 1
        acc.add_sample(
            "a",
            &sweep(&thresholds, vec![counts(3, 4, 3, 4), counts(1, 4, 1, 4)]),
        )
        .unwrap();
        acc.add_sample(
            "b",
            &sweep(&thresholds, vec![counts(0, 4, 0, 4), counts(4, 4, 4, 4)]),
        )
        .unwrap();
        let results = acc.finalize();
        // pooled best counts: (3+4) matched of (4+4)
        assert!((results.overall.best_recall - 7.0 / 8.0).abs() < 1e-12);
        assert!((results.overall.best_precision - 7.0 / 8.0).abs() < 1e-12);
        assert_eq!(results.sample_results[0].threshold, 0.25);
        assert_eq!(results.sample_results[1].threshold, 0.75);
    }

    #[test]
    fn test_flat_recall_curve_gives_zero_ap() {
        let thresholds = vec![0.25, 0.5];
        let mut acc = CurveAccumulator::new(thresholds.clone()).unwrap();
        acc.add_sample(
            "a",
            &sweep(&thresholds, vec![counts(2, 4, 2, 2), counts(2, 4, 2, 3)]),
        )
        .unwrap();
        let results = acc.finalize();
        assert_eq!(results.overall.area_pr, 0.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut acc = CurveAccumulator::new(vec![0.5]).unwrap();
        let bad = sweep(&[0.25, 0.5], vec![counts(0, 0, 0, 0), counts(0, 0, 0, 0)]);
        assert!(acc.add_sample("a", &bad).is_err());
    }

    #[test]
    fn test_empty_thresholds_rejected() {
        assert!(CurveAccumulator::new(vec![]).is_err());
    }

    #[test]
    fn test_no_samples_finalizes_to_zero_curve() {
        let results = CurveAccumulator::new(vec![0.5]).unwrap().finalize();
        assert!(results.sample_results.is_empty());
        assert_eq!(results.threshold_results[0].f1, 0.0);
        assert_eq!(results.overall.f1, 0.0);
        assert_eq!(results.overall.area_pr, 0.0);
    }
}
