//! Example demonstrating a full boundary evaluation over a synthetic sample set.

use boundary_eval::dispatch::pr_evaluation;
use boundary_eval::evaluator::EvalOptions;
use boundary_eval::map::{BoundaryMap, StrengthMap};
use boundary_eval::polars_utils::{sample_results_to_df, threshold_results_to_df};
use boundary_eval::threshold::ThresholdSpec;

/// Circle-boundary strength map: response fades with distance from the ring.
fn render_prediction(size: usize, radius: f64, sharpness: f64) -> StrengthMap {
    let mut pred = StrengthMap::new(size, size);
    let center = size as f64 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            let d = (dx * dx + dy * dy).sqrt();
            pred.set(x, y, (-(d - radius).powi(2) / sharpness).exp());
        }
    }
    pred
}

/// Ideal circle-boundary annotation.
fn render_annotation(size: usize, radius: f64) -> BoundaryMap {
    let mut gt = BoundaryMap::new(size, size);
    let center = size as f64 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            let d = (dx * dx + dy * dy).sqrt();
            if (d - radius).abs() < 0.6 {
                gt.set(x, y, true);
            }
        }
    }
    gt
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Boundary Evaluation Example ===\n");

    let sample_names: Vec<String> = (0..4).map(|i| format!("circle-{i}")).collect();

    // Each sample is a circle of a different radius; predictions get blurrier
    // with the sample index, ground truth has two slightly disagreeing
    // annotators.
    let load_pred = |name: &str| {
        let i: usize = name.rsplit('-').next().unwrap().parse().unwrap();
        Ok(render_prediction(48, 10.0 + 2.0 * i as f64, 2.0 + i as f64))
    };
    let load_gt = |name: &str| {
        let i: usize = name.rsplit('-').next().unwrap().parse().unwrap();
        let radius = 10.0 + 2.0 * i as f64;
        Ok(vec![
            render_annotation(48, radius),
            render_annotation(48, radius + 0.5),
        ])
    };

    println!("1. Evaluating {} samples on 4 workers", sample_names.len());
    let results = pr_evaluation(
        &ThresholdSpec::Count(25),
        &sample_names,
        &load_gt,
        &load_pred,
        EvalOptions::default(),
        4,
    )?;

    println!("\n2. Summary");
    println!("   ODS threshold: {:.4}", results.overall.threshold);
    println!("   ODS F1:        {:.4}", results.overall.f1);
    println!("   OIS F1:        {:.4}", results.overall.best_f1);
    println!("   AP:            {:.4}", results.overall.area_pr);

    println!("\n3. Per-sample best operating points");
    let samples_df = sample_results_to_df(&results.sample_results)?;
    println!("{samples_df}");

    println!("\n4. Precision-recall curve (first rows)");
    let curve_df = threshold_results_to_df(&results.threshold_results)?;
    println!("{}", curve_df.head(Some(8)));

    Ok(())
}
