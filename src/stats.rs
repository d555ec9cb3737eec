//! Run statistics for batch evaluation.
//!
//! Tracks what a finished batch actually processed, for logging alongside
//! the result records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::SweepCounts;

/// Counters collected over one evaluation batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalStats {
    /// Number of samples evaluated
    pub samples: usize,
    /// Number of thresholds swept per sample
    pub thresholds: usize,
    /// Samples whose ground-truth set contained no boundary pixels
    pub empty_ground_truth: usize,
    /// Wall-clock time of the batch in milliseconds
    pub elapsed_ms: f64,
}

impl EvalStats {
    /// Summarize a finished batch.
    pub fn from_run(sample_data: &[SweepCounts], thresholds: usize, elapsed: Duration) -> Self {
        let empty_ground_truth = sample_data
            .iter()
            .filter(|sweep| sweep.counts.first().map_or(true, |c| c.sum_r == 0))
            .count();
        Self {
            samples: sample_data.len(),
            thresholds,
            empty_ground_truth,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    /// One-line summary for logging.
    pub fn summary_string(&self) -> String {
        format!(
            "evaluated {} samples x {} thresholds in {:.1}ms ({} with empty ground truth)",
            self.samples, self.thresholds, self.elapsed_ms, self.empty_ground_truth
        )
    }
}
