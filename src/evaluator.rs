//! Per-sample threshold-sweep evaluation of predicted boundary maps.

use log::debug;

use crate::error::{BoundaryEvalError, Result};
use crate::map::{BoundaryMap, StrengthMap};
use crate::matching::{AugmentingMatcher, CorrespondOracle};
use crate::thin::{MorphologicalThinner, Thinner};
use crate::threshold::ThresholdSpec;
use crate::types::{MatchCounts, SweepCounts};

/// Options shared by every sweep of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvalOptions {
    /// Maximum matching distance as a fraction of the image diagonal
    pub max_dist: f64,
    /// Thin the binarized prediction before matching
    pub apply_thinning: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_dist: 0.0075,
            apply_thinning: true,
        }
    }
}

/// Evaluates one sample across a threshold sweep.
///
/// The evaluator owns a resolved threshold sequence, the matching tolerance
/// and the thinning flag, plus the correspondence and thinning backings. One
/// instance is shared (immutably) across all samples of a run, so results do
/// not depend on which worker evaluates which sample.
pub struct SweepEvaluator {
    thresholds: Vec<f64>,
    options: EvalOptions,
    matcher: Box<dyn CorrespondOracle>,
    thinner: Box<dyn Thinner>,
}

impl std::fmt::Debug for SweepEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepEvaluator")
            .field("thresholds", &self.thresholds)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SweepEvaluator {
    /// Build an evaluator with the default matching and thinning backings.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold specification is invalid or
    /// `max_dist` is negative or non-finite.
    pub fn new(thresholds: &ThresholdSpec, options: EvalOptions) -> Result<Self> {
        Self::with_oracles(
            thresholds,
            options,
            Box::new(AugmentingMatcher),
            Box::new(MorphologicalThinner),
        )
    }

    /// Build an evaluator with caller-supplied oracle backings.
    pub fn with_oracles(
        thresholds: &ThresholdSpec,
        options: EvalOptions,
        matcher: Box<dyn CorrespondOracle>,
        thinner: Box<dyn Thinner>,
    ) -> Result<Self> {
        if !options.max_dist.is_finite() || options.max_dist < 0.0 {
            return Err(BoundaryEvalError::InvalidConfig(format!(
                "max_dist must be a non-negative finite fraction, got {}",
                options.max_dist
            )));
        }
        Ok(Self {
            thresholds: thresholds.resolve()?,
            options,
            matcher,
            thinner,
        })
    }

    /// The resolved threshold sequence, in sweep order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Evaluate a strength map against a set of ground-truth annotations.
    ///
    /// For each threshold the map is binarized (`strength >= t`), optionally
    /// thinned, and matched against every annotation. Predicted pixels are
    /// counted as matched if they match *any* annotator (union), while
    /// ground-truth counts are summed per annotator, so recall reflects
    /// average per-annotator coverage rather than coverage of the union.
    ///
    /// # Errors
    ///
    /// Returns an error if any ground-truth map disagrees with the predicted
    /// map's shape, or if the correspondence oracle fails.
    pub fn evaluate(&self, pred: &StrengthMap, gts: &[BoundaryMap]) -> Result<SweepCounts> {
        check_shapes(pred.shape(), gts)?;

        let tolerance = self.options.max_dist * pred.diagonal();
        debug!(
            "sweeping {} thresholds over a {}x{} map ({} annotators, tolerance {:.3}px)",
            self.thresholds.len(),
            pred.w,
            pred.h,
            gts.len(),
            tolerance
        );

        let mut counts = Vec::with_capacity(self.thresholds.len());
        for &threshold in &self.thresholds {
            let mut mask = pred.binarize(threshold);
            if self.options.apply_thinning {
                mask = self.thinner.thin(&mask);
            }
            counts.push(self.accumulate(&mask, gts, tolerance)?);
        }

        Ok(SweepCounts {
            thresholds: self.thresholds.clone(),
            counts,
        })
    }

    /// Evaluate a single already-binarized prediction (no sweep).
    ///
    /// Performs the same matching and accumulation as one step of
    /// [`SweepEvaluator::evaluate`], for callers that own a hard decision
    /// boundary rather than a strength map.
    pub fn evaluate_binary(&self, pred: &BoundaryMap, gts: &[BoundaryMap]) -> Result<MatchCounts> {
        check_shapes(pred.shape(), gts)?;

        let tolerance = self.options.max_dist * pred.diagonal();
        if self.options.apply_thinning {
            let thinned = self.thinner.thin(pred);
            self.accumulate(&thinned, gts, tolerance)
        } else {
            self.accumulate(pred, gts, tolerance)
        }
    }

    /// Match one binary mask against every annotation and accumulate counts.
    fn accumulate(
        &self,
        mask: &BoundaryMap,
        gts: &[BoundaryMap],
        tolerance: f64,
    ) -> Result<MatchCounts> {
        let mut acc_prec = BoundaryMap::new(mask.w, mask.h);
        let mut sum_r = 0u64;
        let mut count_r = 0u64;

        for gt in gts {
            let matched = self.matcher.correspond(mask, gt, tolerance)?;
            acc_prec.or_assign(&matched.matched_pred);
            sum_r += gt.count_true();
            count_r += matched.matched_gt.count_true();
        }

        Ok(MatchCounts {
            count_r,
            sum_r,
            count_p: acc_prec.count_true(),
            sum_p: mask.count_true(),
        })
    }
}

fn check_shapes(pred_shape: (usize, usize), gts: &[BoundaryMap]) -> Result<()> {
    for (i, gt) in gts.iter().enumerate() {
        if gt.shape() != pred_shape {
            return Err(BoundaryEvalError::ShapeMismatch(format!(
                "ground-truth map {} is {:?} but prediction is {:?}",
                i,
                gt.shape(),
                pred_shape
            )));
        }
    }
    Ok(())
}
