//! Morphological thinning of binary boundary maps.
//!
//! Thinning reduces thick boundary responses to 1-pixel-wide skeletons before
//! matching, so that a wide detector stroke is not rewarded with extra
//! matched pixels. The evaluator depends on the [`Thinner`] contract only;
//! [`MorphologicalThinner`] is the built-in backing (Zhang-Suen).

use crate::map::BoundaryMap;

/// Shape-preserving binary thinning. Must be idempotent on already-thin input.
pub trait Thinner: Send + Sync {
    /// Thin `mask` to a skeleton of the same shape.
    fn thin(&self, mask: &BoundaryMap) -> BoundaryMap;
}

/// Built-in thinning backing using the Zhang-Suen two-subiteration algorithm.
///
/// Each pass deletes boundary pixels whose 8-neighborhood shows a single
/// 0-to-1 transition and 2..=6 set neighbors, subject to the per-subiteration
/// corner conditions; iteration stops when a full pass deletes nothing.
/// Output pixels are always a subset of the input pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorphologicalThinner;

impl Thinner for MorphologicalThinner {
    fn thin(&self, mask: &BoundaryMap) -> BoundaryMap {
        let mut current = mask.clone();
        let (w, h) = mask.shape();
        if w == 0 || h == 0 {
            return current;
        }

        let mut to_delete: Vec<(usize, usize)> = Vec::new();
        loop {
            let mut changed = false;
            for pass in 0..2 {
                to_delete.clear();
                for y in 0..h {
                    for x in 0..w {
                        if current.get(x, y) && removable(&current, x, y, pass) {
                            to_delete.push((x, y));
                        }
                    }
                }
                for &(x, y) in &to_delete {
                    current.set(x, y, false);
                }
                changed |= !to_delete.is_empty();
            }
            if !changed {
                return current;
            }
        }
    }
}

/// Neighbors p2..p9 clockwise from north; out-of-bounds reads as false.
fn neighbors(mask: &BoundaryMap, x: usize, y: usize) -> [bool; 8] {
    let (w, h) = mask.shape();
    let at = |dx: isize, dy: isize| -> bool {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
            return false;
        }
        mask.get(nx as usize, ny as usize)
    };
    [
        at(0, -1),  // p2: N
        at(1, -1),  // p3: NE
        at(1, 0),   // p4: E
        at(1, 1),   // p5: SE
        at(0, 1),   // p6: S
        at(-1, 1),  // p7: SW
        at(-1, 0),  // p8: W
        at(-1, -1), // p9: NW
    ]
}

fn removable(mask: &BoundaryMap, x: usize, y: usize, pass: usize) -> bool {
    let p = neighbors(mask, x, y);
    let set_count = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&set_count) {
        return false;
    }

    // transitions false -> true around the circular neighbor sequence
    let transitions = (0..8)
        .filter(|&i| !p[i] && p[(i + 1) % 8])
        .count();
    if transitions != 1 {
        return false;
    }

    let (p2, p4, p6, p8) = (p[0], p[2], p[4], p[6]);
    if pass == 0 {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    }
}
