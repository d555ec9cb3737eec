//! Core data types for boundary-benchmark results.

use serde::{Deserialize, Serialize};

/// Raw match counts for one threshold.
///
/// `count_r`/`sum_r` are matched and total ground-truth pixels (summed across
/// annotators), `count_p`/`sum_p` are matched and total predicted pixels after
/// thinning. Invariants: `count_r <= sum_r` and `count_p <= sum_p`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    /// Matched ground-truth pixels, summed over annotators
    pub count_r: u64,
    /// Total ground-truth pixels, summed over annotators
    pub sum_r: u64,
    /// Matched predicted pixels (union over annotators)
    pub count_p: u64,
    /// Total predicted pixels after thinning
    pub sum_p: u64,
}

impl MatchCounts {
    /// Add another set of counts into this one, field by field.
    pub fn merge(&mut self, other: &MatchCounts) {
        self.count_r += other.count_r;
        self.sum_r += other.sum_r;
        self.count_p += other.count_p;
        self.sum_p += other.sum_p;
    }
}

/// Per-threshold match counts for one sample, with the threshold vector that
/// produced them echoed back for downstream reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCounts {
    /// The thresholds used, in sweep order
    pub thresholds: Vec<f64>,
    /// One `MatchCounts` per threshold, positionally aligned
    pub counts: Vec<MatchCounts>,
}

impl SweepCounts {
    /// Number of thresholds in the sweep.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when the sweep holds no thresholds.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// The best operating point of a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Identifier of the sample this result applies to
    pub sample_name: String,
    /// Threshold at which this sample attains its best F1
    pub threshold: f64,
    /// Recall at that threshold
    pub recall: f64,
    /// Precision at that threshold
    pub precision: f64,
    /// F1 at that threshold
    pub f1: f64,
}

/// Dataset-level scores at one threshold, derived from aggregated counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// The threshold this result applies to
    pub threshold: f64,
    /// Dataset recall at this threshold
    pub recall: f64,
    /// Dataset precision at this threshold
    pub precision: f64,
    /// Dataset F1 at this threshold
    pub f1: f64,
}

/// Summary record for a whole evaluation run.
///
/// The first four fields are the ODS point (single best dataset-wide
/// threshold), the `best_*` fields are the OIS scores (each sample picks its
/// own threshold, raw counts pooled), and `area_pr` is the AP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    /// ODS threshold
    pub threshold: f64,
    /// Recall at the ODS threshold
    pub recall: f64,
    /// Precision at the ODS threshold
    pub precision: f64,
    /// F1 at the ODS threshold
    pub f1: f64,
    /// OIS recall
    pub best_recall: f64,
    /// OIS precision
    pub best_precision: f64,
    /// OIS F1
    pub best_f1: f64,
    /// Area under the interpolated precision-recall curve (AP)
    pub area_pr: f64,
}

/// The three result-record collections produced by an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    /// One entry per sample, in input order
    pub sample_results: Vec<SampleResult>,
    /// One entry per threshold, in sweep order
    pub threshold_results: Vec<ThresholdResult>,
    /// The ODS/OIS/AP summary
    pub overall: OverallResult,
}
