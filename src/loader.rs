//! JSON loading utilities for boundary maps.
//!
//! Dataset-specific formats live outside this crate; these helpers cover the
//! common case of plain 2-D JSON arrays, mainly for demos and test fixtures.
//! Strength maps are arrays of rows of numbers; ground-truth sets are arrays
//! of such grids, one per annotator, where any nonzero value flags a
//! boundary pixel.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BoundaryEvalError, Result};
use crate::map::{BoundaryMap, StrengthMap};

/// Load a strength map from a JSON file containing a 2-D array of numbers.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or is not a
/// non-empty rectangular grid.
pub fn load_strength_from_file<P: AsRef<Path>>(path: P) -> Result<StrengthMap> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let rows: Vec<Vec<f64>> = serde_json::from_reader(reader)?;
    strength_from_rows(rows)
}

/// Load a ground-truth annotation set from a JSON file containing an array of
/// 2-D arrays (one grid per annotator).
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or any grid is not a
/// non-empty rectangular grid.
pub fn load_boundaries_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<BoundaryMap>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let grids: Vec<Vec<Vec<f64>>> = serde_json::from_reader(reader)?;
    grids.into_iter().map(boundary_from_rows).collect()
}

/// Build a strength map from parsed rows.
pub fn strength_from_rows(rows: Vec<Vec<f64>>) -> Result<StrengthMap> {
    let (w, h) = validate_rows(&rows)?;
    let mut data = Vec::with_capacity(w * h);
    for row in &rows {
        data.extend_from_slice(row);
    }
    StrengthMap::from_vec(w, h, data)
}

/// Build a boundary map from parsed rows; any nonzero value is a boundary.
pub fn boundary_from_rows(rows: Vec<Vec<f64>>) -> Result<BoundaryMap> {
    let (w, h) = validate_rows(&rows)?;
    let mut data = Vec::with_capacity(w * h);
    for row in &rows {
        data.extend(row.iter().map(|&v| v != 0.0));
    }
    BoundaryMap::from_vec(w, h, data)
}

fn validate_rows(rows: &[Vec<f64>]) -> Result<(usize, usize)> {
    let h = rows.len();
    if h == 0 {
        return Err(BoundaryEvalError::InvalidGrid(
            "grid must contain at least one row".to_string(),
        ));
    }
    let w = rows[0].len();
    if w == 0 {
        return Err(BoundaryEvalError::InvalidGrid(
            "grid rows must not be empty".to_string(),
        ));
    }
    for (y, row) in rows.iter().enumerate() {
        if row.len() != w {
            return Err(BoundaryEvalError::InvalidGrid(format!(
                "row {} has {} values, expected {}",
                y,
                row.len(),
                w
            )));
        }
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_from_rows() {
        let map = strength_from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap();
        assert_eq!(map.shape(), (2, 2));
        assert_eq!(map.get(1, 0), 0.2);
        assert_eq!(map.get(0, 1), 0.3);
    }

    #[test]
    fn test_boundary_from_rows_nonzero_is_true() {
        let map = boundary_from_rows(vec![vec![0.0, 1.0], vec![0.5, 0.0]]).unwrap();
        assert!(!map.get(0, 0));
        assert!(map.get(1, 0));
        assert!(map.get(0, 1));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = strength_from_rows(vec![vec![0.1, 0.2], vec![0.3]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(strength_from_rows(vec![]).is_err());
        assert!(strength_from_rows(vec![vec![]]).is_err());
    }
}
