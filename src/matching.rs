//! Pixel correspondence between predicted and ground-truth boundary maps.
//!
//! The evaluator only depends on the [`CorrespondOracle`] contract; the
//! matching algorithm itself is a pluggable backing. [`AugmentingMatcher`] is
//! the built-in backing: a maximum-cardinality bipartite matching over pixel
//! pairs within the distance tolerance. Tie-breaking among equally valid
//! matchings is implementation-defined; this backing is deterministic
//! (pixels and candidates are visited in row-major order).

use crate::error::{BoundaryEvalError, Result};
use crate::map::BoundaryMap;

/// Matched-status masks returned by a correspondence oracle.
///
/// Both masks have the shape of the oracle inputs; a pixel is matched iff its
/// flag is set.
#[derive(Debug, Clone)]
pub struct PixelCorrespondence {
    /// Matched status aligned to the predicted mask
    pub matched_pred: BoundaryMap,
    /// Matched status aligned to the ground-truth mask
    pub matched_gt: BoundaryMap,
}

/// Bipartite pixel-correspondence oracle.
///
/// Given a predicted mask, a ground-truth mask of the same shape and a
/// distance tolerance in pixels, returns which pixels of each mask found a
/// partner in the other within the tolerance.
pub trait CorrespondOracle: Send + Sync {
    /// Match predicted pixels against ground-truth pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the masks disagree on shape.
    fn correspond(
        &self,
        pred: &BoundaryMap,
        gt: &BoundaryMap,
        max_dist: f64,
    ) -> Result<PixelCorrespondence>;
}

/// Built-in correspondence backing: maximum-cardinality bipartite matching
/// via augmenting paths, with candidate pairs restricted to Euclidean
/// distance `<= max_dist`.
///
/// Complexity is O(P · E) over P predicted pixels and E candidate pairs;
/// candidate generation scans a window of radius `floor(max_dist)` per pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AugmentingMatcher;

impl CorrespondOracle for AugmentingMatcher {
    fn correspond(
        &self,
        pred: &BoundaryMap,
        gt: &BoundaryMap,
        max_dist: f64,
    ) -> Result<PixelCorrespondence> {
        if pred.shape() != gt.shape() {
            return Err(BoundaryEvalError::ShapeMismatch(format!(
                "predicted mask is {:?} but ground truth is {:?}",
                pred.shape(),
                gt.shape()
            )));
        }

        let (w, h) = pred.shape();
        let tolerance = max_dist.max(0.0);

        // Index the ground-truth pixels and keep a position lookup grid.
        let mut gt_lookup = vec![usize::MAX; w * h];
        let mut gt_pixels: Vec<(usize, usize)> = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if gt.get(x, y) {
                    gt_lookup[y * w + x] = gt_pixels.len();
                    gt_pixels.push((x, y));
                }
            }
        }

        let mut pred_pixels: Vec<(usize, usize)> = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if pred.get(x, y) {
                    pred_pixels.push((x, y));
                }
            }
        }

        // Candidate ground-truth partners per predicted pixel.
        let radius = tolerance.floor() as isize;
        let max_sq = tolerance * tolerance;
        let adjacency: Vec<Vec<usize>> = pred_pixels
            .iter()
            .map(|&(x, y)| {
                let mut candidates = Vec::new();
                for dy in -radius..=radius {
                    let ny = y as isize + dy;
                    if ny < 0 || ny >= h as isize {
                        continue;
                    }
                    for dx in -radius..=radius {
                        let nx = x as isize + dx;
                        if nx < 0 || nx >= w as isize {
                            continue;
                        }
                        if ((dx * dx + dy * dy) as f64) > max_sq {
                            continue;
                        }
                        let gt_idx = gt_lookup[ny as usize * w + nx as usize];
                        if gt_idx != usize::MAX {
                            candidates.push(gt_idx);
                        }
                    }
                }
                candidates
            })
            .collect();

        // Augmenting-path search for a maximum-cardinality matching.
        let mut gt_owner = vec![usize::MAX; gt_pixels.len()];
        for pred_idx in 0..pred_pixels.len() {
            let mut visited = vec![false; gt_pixels.len()];
            augment(pred_idx, &adjacency, &mut visited, &mut gt_owner);
        }

        let mut matched_pred = BoundaryMap::new(w, h);
        let mut matched_gt = BoundaryMap::new(w, h);
        for (gt_idx, &owner) in gt_owner.iter().enumerate() {
            if owner != usize::MAX {
                let (gx, gy) = gt_pixels[gt_idx];
                matched_gt.set(gx, gy, true);
                let (px, py) = pred_pixels[owner];
                matched_pred.set(px, py, true);
            }
        }

        Ok(PixelCorrespondence {
            matched_pred,
            matched_gt,
        })
    }
}

/// Try to find an augmenting path from `pred_idx`; reassigns owners on success.
fn augment(
    pred_idx: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    gt_owner: &mut [usize],
) -> bool {
    for &gt_idx in &adjacency[pred_idx] {
        if visited[gt_idx] {
            continue;
        }
        visited[gt_idx] = true;
        if gt_owner[gt_idx] == usize::MAX || augment(gt_owner[gt_idx], adjacency, visited, gt_owner)
        {
            gt_owner[gt_idx] = pred_idx;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from(w: usize, h: usize, on: &[(usize, usize)]) -> BoundaryMap {
        let mut m = BoundaryMap::new(w, h);
        for &(x, y) in on {
            m.set(x, y, true);
        }
        m
    }

    #[test]
    fn test_exact_overlap_matches() {
        let pred = map_from(4, 4, &[(1, 2)]);
        let gt = map_from(4, 4, &[(1, 2)]);
        let m = AugmentingMatcher.correspond(&pred, &gt, 0.0).unwrap();
        assert_eq!(m.matched_pred.count_true(), 1);
        assert_eq!(m.matched_gt.count_true(), 1);
        assert!(m.matched_pred.get(1, 2));
        assert!(m.matched_gt.get(1, 2));
    }

    #[test]
    fn test_within_tolerance_matches() {
        let pred = map_from(8, 8, &[(2, 2)]);
        let gt = map_from(8, 8, &[(4, 2)]);
        let m = AugmentingMatcher.correspond(&pred, &gt, 2.0).unwrap();
        assert_eq!(m.matched_pred.count_true(), 1);
        assert_eq!(m.matched_gt.count_true(), 1);
    }

    #[test]
    fn test_beyond_tolerance_does_not_match() {
        let pred = map_from(8, 8, &[(2, 2)]);
        let gt = map_from(8, 8, &[(6, 2)]);
        let m = AugmentingMatcher.correspond(&pred, &gt, 2.0).unwrap();
        assert_eq!(m.matched_pred.count_true(), 0);
        assert_eq!(m.matched_gt.count_true(), 0);
    }

    #[test]
    fn test_matching_is_one_to_one() {
        // two predictions compete for one ground-truth pixel
        let pred = map_from(8, 8, &[(2, 2), (4, 2)]);
        let gt = map_from(8, 8, &[(3, 2)]);
        let m = AugmentingMatcher.correspond(&pred, &gt, 1.5).unwrap();
        assert_eq!(m.matched_pred.count_true(), 1);
        assert_eq!(m.matched_gt.count_true(), 1);
    }

    #[test]
    fn test_augmenting_path_reaches_maximum() {
        // (0,0) grabs gt (1,0) first and must be displaced onto gt (0,1)
        // so that (2,0), which only reaches gt (1,0), can match too.
        let pred = map_from(3, 2, &[(0, 0), (2, 0)]);
        let gt = map_from(3, 2, &[(1, 0), (0, 1)]);
        let m = AugmentingMatcher.correspond(&pred, &gt, 1.5).unwrap();
        assert_eq!(m.matched_pred.count_true(), 2);
        assert_eq!(m.matched_gt.count_true(), 2);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let pred = BoundaryMap::new(4, 4);
        let gt = BoundaryMap::new(5, 4);
        assert!(AugmentingMatcher.correspond(&pred, &gt, 1.0).is_err());
    }

    #[test]
    fn test_empty_masks() {
        let pred = BoundaryMap::new(4, 4);
        let gt = BoundaryMap::new(4, 4);
        let m = AugmentingMatcher.correspond(&pred, &gt, 2.0).unwrap();
        assert_eq!(m.matched_pred.count_true(), 0);
        assert_eq!(m.matched_gt.count_true(), 0);
    }
}
