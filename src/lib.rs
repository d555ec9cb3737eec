//! # boundary-eval
//!
//! A Rust library for benchmarking boundary/edge detection models against
//! one or more human annotations per image.
//!
//! This library provides implementations of the standard boundary-benchmark
//! metrics:
//! - **ODS** (Optimal Dataset Scale): F1 at the single best dataset-wide threshold
//! - **OIS** (Optimal Image Scale): F1 with each sample picking its own best threshold
//! - **AP** (Average Precision): area under the interpolated precision-recall curve
//! - **Precision / Recall / F1** curves across a threshold sweep
//!
//! ## Features
//!
//! - Sweep a predicted strength map over generated or explicit thresholds
//! - Morphological thinning of binarized predictions before matching
//! - Distance-tolerant pixel correspondence against multiple annotators
//! - Parallel per-sample evaluation with deterministic, order-preserving results
//! - Directional non-maximum suppression preprocessing for raw edge maps
//! - Result records convertible to polars DataFrames
//!
//! ## Quick Start
//!
//! ```rust
//! use boundary_eval::dispatch::pr_evaluation;
//! use boundary_eval::evaluator::EvalOptions;
//! use boundary_eval::map::{BoundaryMap, StrengthMap};
//! use boundary_eval::threshold::ThresholdSpec;
//!
//! # fn main() -> boundary_eval::Result<()> {
//! let samples = vec!["img-001".to_string()];
//!
//! // loaders map a sample name to its data; real ones would read files
//! let load_pred = |_: &str| -> boundary_eval::Result<StrengthMap> {
//!     let mut pred = StrengthMap::new(16, 16);
//!     for y in 2..14 {
//!         pred.set(8, y, 0.9);
//!     }
//!     Ok(pred)
//! };
//! let load_gt = |_: &str| -> boundary_eval::Result<Vec<BoundaryMap>> {
//!     let mut gt = BoundaryMap::new(16, 16);
//!     for y in 2..14 {
//!         gt.set(8, y, true);
//!     }
//!     Ok(vec![gt])
//! };
//!
//! let results = pr_evaluation(
//!     &ThresholdSpec::Count(5),
//!     &samples,
//!     &load_gt,
//!     &load_pred,
//!     EvalOptions::default(),
//!     1,
//! )?;
//!
//! println!("ODS F1: {:.4}", results.overall.f1);
//! println!("OIS F1: {:.4}", results.overall.best_f1);
//! println!("AP:     {:.4}", results.overall.area_pr);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod map;
pub mod matching;
pub mod metrics;
pub mod nms;
pub mod polars_utils;
pub mod stats;
pub mod thin;
pub mod threshold;
pub mod types;

// Re-export commonly used types and functions
pub use aggregate::CurveAccumulator;
pub use dispatch::{evaluate_samples, pr_evaluation};
pub use error::{BoundaryEvalError, Result};
pub use evaluator::{EvalOptions, SweepEvaluator};
pub use map::{BoundaryMap, StrengthMap};
pub use threshold::ThresholdSpec;
pub use types::{
    EvaluationResults, MatchCounts, OverallResult, SampleResult, SweepCounts, ThresholdResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        // Basic smoke test to ensure the library compiles
        let map = StrengthMap::new(4, 4);
        assert_eq!(map.binarize(0.5).count_true(), 0);
    }
}
