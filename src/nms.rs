//! Edge-suppression preprocessing (directional non-maximum suppression).
//!
//! Converts a raw strength map into a suppressed edge map before
//! thresholding: the map is smoothed with a triangle filter, a per-pixel
//! orientation field is derived from second-order gradients of a more heavily
//! smoothed copy, and responses not locally maximal along the direction given
//! by that field are zeroed. Pixels near the image border are additionally
//! faded out.
//!
//! The suppression decision compares a pixel against bilinearly interpolated
//! neighbor values. Differences on the order of 1e-8 between floating-point
//! evaluation strategies can flip a pixel between kept and suppressed, so
//! bit-for-bit parity with another implementation requires matching its
//! evaluation order exactly. This is an inherent fragility of the algorithm,
//! not something to paper over.

use crate::error::{BoundaryEvalError, Result};
use crate::map::StrengthMap;

const ORIENT_EPS: f64 = 1e-5;

/// Parameters of the directional suppression.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NmsOptions {
    /// Suppression radius in pixels along the orientation
    pub radius: usize,
    /// Width of the faded band along the image border
    pub boundary_radius: usize,
    /// Conservative multiplier: a pixel survives unless a neighbor beats
    /// `value * multiplier`
    pub multiplier: f64,
}

impl Default for NmsOptions {
    fn default() -> Self {
        Self {
            radius: 1,
            boundary_radius: 5,
            multiplier: 1.01,
        }
    }
}

/// Smooth with a separable triangle (tent) filter of the given radius.
///
/// The 1-D kernel is `[1, 2, ..., r, r+1, r, ..., 2, 1] / (r+1)^2`; borders
/// are handled by clamping (edge replication). Radius 0 is the identity.
pub fn conv_tri(src: &StrengthMap, radius: usize) -> StrengthMap {
    if radius == 0 {
        return src.clone();
    }
    let taps: Vec<f64> = (1..=radius as i64 + 1)
        .chain((1..=radius as i64).rev())
        .map(|v| v as f64)
        .collect();
    let norm = ((radius + 1) * (radius + 1)) as f64;

    let (w, h) = src.shape();
    let r = radius as isize;

    // horizontal pass
    let mut tmp = StrengthMap::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - r).clamp(0, w as isize - 1) as usize;
                sum += row[sx] * tap;
            }
            tmp.set(x, y, sum);
        }
    }

    // vertical pass
    let mut out = StrengthMap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = (y as isize + k as isize - r).clamp(0, h as isize - 1) as usize;
                sum += tmp.get(x, sy) * tap;
            }
            out.set(x, y, sum / norm);
        }
    }
    out
}

/// Central-difference gradients `(gx, gy)`.
///
/// Interior pixels use `(f[i+1] - f[i-1]) / 2`; border pixels fall back to
/// the one-sided difference. Shape-preserving.
pub fn grad2(src: &StrengthMap) -> (StrengthMap, StrengthMap) {
    let (w, h) = src.shape();
    let mut gx = StrengthMap::new(w, h);
    let mut gy = StrengthMap::new(w, h);
    if w == 0 || h == 0 {
        return (gx, gy);
    }

    for y in 0..h {
        for x in 0..w {
            let v = if w == 1 {
                0.0
            } else if x == 0 {
                src.get(1, y) - src.get(0, y)
            } else if x == w - 1 {
                src.get(w - 1, y) - src.get(w - 2, y)
            } else {
                (src.get(x + 1, y) - src.get(x - 1, y)) / 2.0
            };
            gx.set(x, y, v);

            let v = if h == 1 {
                0.0
            } else if y == 0 {
                src.get(x, 1) - src.get(x, 0)
            } else if y == h - 1 {
                src.get(x, h - 1) - src.get(x, h - 2)
            } else {
                (src.get(x, y + 1) - src.get(x, y - 1)) / 2.0
            };
            gy.set(x, y, v);
        }
    }
    (gx, gy)
}

/// Per-pixel orientation field of an edge map, in `[0, pi)`.
///
/// Derived from second-order gradients of a radius-4 triangle smoothing of
/// the edge map: `theta = atan(oyy * sign(-oxy) / (oxx + eps)) mod pi`.
pub fn orientation_field(edge: &StrengthMap) -> StrengthMap {
    let smoothed = conv_tri(edge, 4);
    let (ox, oy) = grad2(&smoothed);
    let (oxx, _) = grad2(&ox);
    let (oxy, oyy) = grad2(&oy);

    let (w, h) = edge.shape();
    let mut ori = StrengthMap::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let oxy_v = oxy.get(x, y);
            let oyy_v = oyy.get(x, y);
            let oxx_v = oxx.get(x, y);
            let angle = (oyy_v * sign(-oxy_v) / (oxx_v + ORIENT_EPS)).atan();
            ori.set(x, y, angle.rem_euclid(std::f64::consts::PI));
        }
    }
    ori
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Bilinear lookup with coordinates clamped just inside the grid.
fn interp(src: &StrengthMap, x: f64, y: f64) -> f64 {
    let (w, h) = src.shape();
    let x = x.min((w as f64 - 1.001).max(0.0)).max(0.0);
    let y = y.min((h as f64 - 1.001).max(0.0)).max(0.0);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let dx0 = x - x0 as f64;
    let dy0 = y - y0 as f64;
    let dx1 = 1.0 - dx0;
    let dy1 = 1.0 - dy0;
    src.get(x0, y0) * dx1 * dy1
        + src.get(x1, y0) * dx0 * dy1
        + src.get(x0, y1) * dx1 * dy0
        + src.get(x1, y1) * dx0 * dy0
}

/// Directional suppression kernel.
///
/// A pixel survives only if `value * multiplier` is not beaten by the
/// interpolated edge strength at any step `d in -radius..=radius, d != 0`
/// along `(cos theta, sin theta)`. Afterwards a band of `boundary_radius`
/// pixels along each image border is faded linearly toward zero.
pub fn suppress_directional(
    edge: &StrengthMap,
    orientation: &StrengthMap,
    options: &NmsOptions,
) -> StrengthMap {
    let (w, h) = edge.shape();
    let mut out = edge.clone();
    let r = options.radius as isize;

    for y in 0..h {
        for x in 0..w {
            let e = edge.get(x, y);
            if e == 0.0 {
                continue;
            }
            let e = e * options.multiplier;
            let o = orientation.get(x, y);
            let (cos_o, sin_o) = (o.cos(), o.sin());
            for d in -r..=r {
                if d == 0 {
                    continue;
                }
                let e0 = interp(
                    edge,
                    x as f64 + d as f64 * cos_o,
                    y as f64 + d as f64 * sin_o,
                );
                if e < e0 {
                    out.set(x, y, 0.0);
                    break;
                }
            }
        }
    }

    let s = options.boundary_radius.min(w / 2).min(h / 2);
    if s > 0 {
        for d in 0..s {
            let fade = d as f64 / s as f64;
            for y in 0..h {
                out.set(d, y, out.get(d, y) * fade);
                out.set(w - 1 - d, y, out.get(w - 1 - d, y) * fade);
            }
            for x in 0..w {
                out.set(x, d, out.get(x, d) * fade);
                out.set(x, h - 1 - d, out.get(x, h - 1 - d) * fade);
            }
        }
    }
    out
}

/// Suppress a real-valued strength map.
///
/// Smooths with a radius-1 triangle filter, derives the orientation field and
/// runs the directional suppression. Values are expected in `[0, 1]`.
pub fn suppress_edges(img: &StrengthMap, options: &NmsOptions) -> StrengthMap {
    let edge = conv_tri(img, 1);
    let orientation = orientation_field(&edge);
    suppress_directional(&edge, &orientation, options)
}

/// Suppress an 8-bit strength map and re-quantize the result.
///
/// Input bytes are normalized to `[0, 1]`, suppressed, clipped back to
/// `[0, 1]`, scaled by 255 and rounded to the nearest integer.
///
/// # Errors
///
/// Returns an error if `data.len() != w * h`.
pub fn suppress_edges_u8(data: &[u8], w: usize, h: usize, options: &NmsOptions) -> Result<Vec<u8>> {
    if data.len() != w * h {
        return Err(BoundaryEvalError::InvalidGrid(format!(
            "expected {} bytes for a {}x{} map, got {}",
            w * h,
            w,
            h,
            data.len()
        )));
    }
    let img = StrengthMap {
        w,
        h,
        data: data.iter().map(|&v| f64::from(v) / 255.0).collect(),
    };
    let out = suppress_edges(&img, options);
    Ok(quantize_u8(&out))
}

/// Clip to `[0, 1]`, scale by 255 and round to the nearest integer.
pub fn quantize_u8(map: &StrengthMap) -> Vec<u8> {
    map.data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}
