//! Example demonstrating threshold sweeps and the ODS/OIS/AP summary on a
//! hand-built count table.

use boundary_eval::aggregate::CurveAccumulator;
use boundary_eval::metrics::{f1_score, rec_prec_f1};
use boundary_eval::threshold::ThresholdSpec;
use boundary_eval::types::{MatchCounts, SweepCounts};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Threshold Sweep Example ===\n");

    // Example 1: generated threshold sequences
    println!("1. Generating Thresholds");
    let thresholds = ThresholdSpec::Count(9).resolve()?;
    println!("   {} interior points of (0,1):", thresholds.len());
    println!("   {thresholds:?}\n");

    // Example 2: simulated per-threshold counts for two samples.
    // As the threshold rises the prediction keeps fewer pixels: recall falls
    // while precision climbs.
    println!("2. Simulated Sweep Counts for Two Samples\n");
    let sample_a: Vec<MatchCounts> = (0..9)
        .map(|i| MatchCounts {
            count_r: 95 - 10 * i,
            sum_r: 100,
            count_p: 90 - 8 * i,
            sum_p: 180 - 19 * i,
        })
        .collect();
    let sample_b: Vec<MatchCounts> = (0..9)
        .map(|i| MatchCounts {
            count_r: 60 - 6 * i,
            sum_r: 80,
            count_p: 58 - 6 * i,
            sum_p: 140 - 14 * i,
        })
        .collect();

    println!("   Threshold | Recall | Precision | F1");
    println!("   ----------|--------|-----------|-------");
    for (i, &threshold) in thresholds.iter().enumerate() {
        let mut pooled = sample_a[i];
        pooled.merge(&sample_b[i]);
        let (recall, precision, f1) = rec_prec_f1(&pooled);
        println!("   {threshold:>9.2} | {recall:>6.4} | {precision:>9.4} | {f1:.4}");
    }
    println!();

    // Example 3: aggregate the sweep and report the summary scores
    println!("3. Aggregated Summary");
    let mut accumulator = CurveAccumulator::new(thresholds.clone())?;
    accumulator.add_sample(
        "sample-a",
        &SweepCounts {
            thresholds: thresholds.clone(),
            counts: sample_a,
        },
    )?;
    accumulator.add_sample(
        "sample-b",
        &SweepCounts {
            thresholds: thresholds.clone(),
            counts: sample_b,
        },
    )?;
    let results = accumulator.finalize();

    println!("   ODS threshold: {:.2}", results.overall.threshold);
    println!("   ODS F1:        {:.4}", results.overall.f1);
    println!("   OIS F1:        {:.4}", results.overall.best_f1);
    println!("   AP:            {:.4}", results.overall.area_pr);
    for sample in &results.sample_results {
        println!(
            "   {} picks threshold {:.2} (F1 {:.4})",
            sample.sample_name, sample.threshold, sample.f1
        );
    }
    println!();

    // Example 4: the zero-guard in action
    println!("4. Degenerate Inputs Stay Finite");
    let empty = MatchCounts::default();
    let (recall, precision, f1) = rec_prec_f1(&empty);
    println!("   empty counts -> recall={recall}, precision={precision}, f1={f1}");
    println!("   f1_score(0.0, 0.0) = {}", f1_score(0.0, 0.0));

    Ok(())
}
