//! Order-preserving dispatch of per-sample evaluation, sequential or across
//! a worker pool.

use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::aggregate::aggregate_samples;
use crate::error::{BoundaryEvalError, Result};
use crate::evaluator::{EvalOptions, SweepEvaluator};
use crate::map::{BoundaryMap, StrengthMap};
use crate::stats::EvalStats;
use crate::threshold::ThresholdSpec;
use crate::types::{EvaluationResults, SweepCounts};

/// Evaluate every named sample, returning sweeps positionally aligned with
/// `sample_names`.
///
/// With `nproc > 1` the samples are fanned out over a worker pool of that
/// size; results are still collected in input order, so the parallel and
/// sequential paths are interchangeable. Samples are independent and the
/// evaluator is shared immutably, so both paths produce identical numbers.
///
/// # Errors
///
/// The first loader or evaluation error aborts the whole batch; no partial
/// results are returned.
pub fn evaluate_samples<P, G>(
    sample_names: &[String],
    load_pred: &P,
    load_gt: &G,
    evaluator: &SweepEvaluator,
    nproc: usize,
) -> Result<Vec<SweepCounts>>
where
    P: Fn(&str) -> Result<StrengthMap> + Sync,
    G: Fn(&str) -> Result<Vec<BoundaryMap>> + Sync,
{
    let run_one = |name: &String| -> Result<SweepCounts> {
        let pred = load_pred(name)?;
        let gts = load_gt(name)?;
        evaluator.evaluate(&pred, &gts)
    };

    if nproc > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nproc)
            .build()
            .map_err(|e| BoundaryEvalError::ThreadPool(e.to_string()))?;
        pool.install(|| sample_names.par_iter().map(run_one).collect())
    } else {
        sample_names.iter().map(run_one).collect()
    }
}

/// Run a full precision-recall evaluation over a sample set.
///
/// Resolves the threshold specification once, evaluates every sample (in
/// parallel when `nproc > 1`), aggregates the per-threshold counts across
/// samples and computes the ODS/OIS/AP summary.
///
/// # Arguments
///
/// * `thresholds` - threshold count or explicit sequence
/// * `sample_names` - identifiers of the samples to evaluate, in output order
/// * `load_gt` - loads the ground-truth annotation set for a named sample
/// * `load_pred` - loads the predicted strength map for a named sample
/// * `options` - matching tolerance and thinning flag
/// * `nproc` - worker-pool size; `<= 1` evaluates sequentially
///
/// # Errors
///
/// Configuration errors are rejected before any sample is loaded; loader and
/// evaluation errors abort the batch (fail-fast).
///
/// # Example
///
/// ```
/// use boundary_eval::dispatch::pr_evaluation;
/// use boundary_eval::evaluator::EvalOptions;
/// use boundary_eval::map::{BoundaryMap, StrengthMap};
/// use boundary_eval::threshold::ThresholdSpec;
///
/// # fn main() -> boundary_eval::Result<()> {
/// let samples = vec!["sample-0".to_string()];
/// let load_pred = |_: &str| -> boundary_eval::Result<StrengthMap> {
///     let mut pred = StrengthMap::new(8, 8);
///     pred.set(3, 4, 1.0);
///     Ok(pred)
/// };
/// let load_gt = |_: &str| -> boundary_eval::Result<Vec<BoundaryMap>> {
///     let mut gt = BoundaryMap::new(8, 8);
///     gt.set(3, 4, true);
///     Ok(vec![gt])
/// };
///
/// let results = pr_evaluation(
///     &ThresholdSpec::Count(5),
///     &samples,
///     &load_gt,
///     &load_pred,
///     EvalOptions::default(),
///     1,
/// )?;
/// assert!((results.overall.f1 - 1.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn pr_evaluation<P, G>(
    thresholds: &ThresholdSpec,
    sample_names: &[String],
    load_gt: &G,
    load_pred: &P,
    options: EvalOptions,
    nproc: usize,
) -> Result<EvaluationResults>
where
    P: Fn(&str) -> Result<StrengthMap> + Sync,
    G: Fn(&str) -> Result<Vec<BoundaryMap>> + Sync,
{
    let started = Instant::now();
    let evaluator = SweepEvaluator::new(thresholds, options)?;

    let sample_data = evaluate_samples(sample_names, load_pred, load_gt, &evaluator, nproc)?;
    let results = aggregate_samples(
        sample_names,
        &sample_data,
        evaluator.thresholds().to_vec(),
    )?;

    let stats = EvalStats::from_run(&sample_data, evaluator.thresholds().len(), started.elapsed());
    info!("{}", stats.summary_string());

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_pred(name: &str) -> Result<StrengthMap> {
        // deterministic per-name synthetic strength map
        let seed = name.len() as f64;
        let mut pred = StrengthMap::new(12, 12);
        for y in 0..12 {
            for x in 0..12 {
                let dx = x as f64 - 5.5;
                let dy = y as f64 - 5.5;
                let d = (dx * dx + dy * dy).sqrt();
                if (d - 3.5).abs() < 0.8 {
                    pred.set(x, y, (0.5 + 0.04 * seed).min(1.0));
                }
            }
        }
        Ok(pred)
    }

    fn ring_gt(_name: &str) -> Result<Vec<BoundaryMap>> {
        let mut gt = BoundaryMap::new(12, 12);
        for y in 0..12 {
            for x in 0..12 {
                let dx = x as f64 - 5.5;
                let dy = y as f64 - 5.5;
                let d = (dx * dx + dy * dy).sqrt();
                if (d - 3.5).abs() < 0.6 {
                    gt.set(x, y, true);
                }
            }
        }
        Ok(vec![gt])
    }

    #[test]
    fn test_results_align_with_input_order() {
        let names: Vec<String> = (0..6).map(|i| format!("sample-{i}")).collect();
        let evaluator = SweepEvaluator::new(
            &ThresholdSpec::Count(5),
            EvalOptions::default(),
        )
        .unwrap();

        let sequential =
            evaluate_samples(&names, &ring_pred, &ring_gt, &evaluator, 1).unwrap();
        let parallel = evaluate_samples(&names, &ring_pred, &ring_gt, &evaluator, 4).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_loader_failure_aborts_batch() {
        let names: Vec<String> = (0..4).map(|i| format!("sample-{i}")).collect();
        let evaluator = SweepEvaluator::new(
            &ThresholdSpec::Count(3),
            EvalOptions::default(),
        )
        .unwrap();
        let failing_pred = |name: &str| -> Result<StrengthMap> {
            if name == "sample-2" {
                Err(BoundaryEvalError::Loader("corrupt sample".to_string()))
            } else {
                ring_pred(name)
            }
        };

        let result = evaluate_samples(&names, &failing_pred, &ring_gt, &evaluator, 1);
        assert!(matches!(result, Err(BoundaryEvalError::Loader(_))));
        let result = evaluate_samples(&names, &failing_pred, &ring_gt, &evaluator, 3);
        assert!(matches!(result, Err(BoundaryEvalError::Loader(_))));
    }

    #[test]
    fn test_pr_evaluation_sequential_equals_parallel() {
        let names: Vec<String> = (0..5).map(|i| format!("sample-{i}")).collect();
        let spec = ThresholdSpec::Count(7);

        let sequential = pr_evaluation(
            &spec,
            &names,
            &ring_gt,
            &ring_pred,
            EvalOptions::default(),
            1,
        )
        .unwrap();
        let parallel = pr_evaluation(
            &spec,
            &names,
            &ring_gt,
            &ring_pred,
            EvalOptions::default(),
            4,
        )
        .unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.sample_results.len(), 5);
        for (i, sample) in sequential.sample_results.iter().enumerate() {
            assert_eq!(sample.sample_name, format!("sample-{i}"));
        }
    }
}
