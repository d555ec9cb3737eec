//! Utilities for working with Polars DataFrames.
//!
//! Converts the result-record collections into DataFrames for tabular
//! inspection and downstream analysis.

use polars::prelude::*;

use crate::error::{BoundaryEvalError, Result};
use crate::types::{SampleResult, ThresholdResult};

/// Columns of a per-threshold curve frame.
pub const CURVE_COLUMNS: [&str; 4] = ["threshold", "recall", "precision", "f1"];

/// Convert the per-threshold curve into a DataFrame with columns
/// `threshold`, `recall`, `precision`, `f1`.
pub fn threshold_results_to_df(results: &[ThresholdResult]) -> Result<DataFrame> {
    let thresholds: Vec<f64> = results.iter().map(|r| r.threshold).collect();
    let recalls: Vec<f64> = results.iter().map(|r| r.recall).collect();
    let precisions: Vec<f64> = results.iter().map(|r| r.precision).collect();
    let f1s: Vec<f64> = results.iter().map(|r| r.f1).collect();

    let df = DataFrame::new(vec![
        Series::new("threshold", thresholds),
        Series::new("recall", recalls),
        Series::new("precision", precisions),
        Series::new("f1", f1s),
    ])?;
    Ok(df)
}

/// Convert per-sample best operating points into a DataFrame with columns
/// `sample`, `threshold`, `recall`, `precision`, `f1`.
pub fn sample_results_to_df(results: &[SampleResult]) -> Result<DataFrame> {
    let samples: Vec<String> = results.iter().map(|r| r.sample_name.clone()).collect();
    let thresholds: Vec<f64> = results.iter().map(|r| r.threshold).collect();
    let recalls: Vec<f64> = results.iter().map(|r| r.recall).collect();
    let precisions: Vec<f64> = results.iter().map(|r| r.precision).collect();
    let f1s: Vec<f64> = results.iter().map(|r| r.f1).collect();

    let df = DataFrame::new(vec![
        Series::new("sample", samples),
        Series::new("threshold", thresholds),
        Series::new("recall", recalls),
        Series::new("precision", precisions),
        Series::new("f1", f1s),
    ])?;
    Ok(df)
}

/// Validate that a DataFrame contains all required columns.
pub fn validate_columns(df: &DataFrame, required_columns: &[&str]) -> Result<()> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col in required_columns {
        if !column_names.iter().any(|c| c == col) {
            return Err(BoundaryEvalError::MissingColumn((*col).to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Vec<ThresholdResult> {
        vec![
            ThresholdResult {
                threshold: 0.25,
                recall: 0.9,
                precision: 0.5,
                f1: 0.642_857,
            },
            ThresholdResult {
                threshold: 0.75,
                recall: 0.4,
                precision: 0.8,
                f1: 0.533_333,
            },
        ]
    }

    #[test]
    fn test_threshold_results_to_df() {
        let df = threshold_results_to_df(&curve()).unwrap();
        assert_eq!(df.height(), 2);
        validate_columns(&df, &CURVE_COLUMNS).unwrap();
    }

    #[test]
    fn test_sample_results_to_df() {
        let results = vec![SampleResult {
            sample_name: "sample-0".to_string(),
            threshold: 0.5,
            recall: 1.0,
            precision: 1.0,
            f1: 1.0,
        }];
        let df = sample_results_to_df(&results).unwrap();
        assert_eq!(df.height(), 1);
        validate_columns(&df, &["sample", "threshold", "f1"]).unwrap();
    }

    #[test]
    fn test_validate_columns_reports_missing() {
        let df = threshold_results_to_df(&curve()).unwrap();
        let result = validate_columns(&df, &["nonexistent"]);
        assert!(matches!(result, Err(BoundaryEvalError::MissingColumn(_))));
    }
}
