//! Average Precision (area under the precision-recall curve).

/// Calculate AP from a per-threshold recall/precision curve.
///
/// Recall values are deduplicated (sorted ascending, each unique value paired
/// with the precision at its first occurrence in the input). Precision is then
/// linearly interpolated onto a fixed grid of 100 recall levels
/// `0.00, 0.01, ..., 0.99`, with recall levels outside the observed range
/// mapping to 0, and AP is the sum of the interpolated values times 0.01.
///
/// Returns 0 when fewer than 2 unique recall values are observed.
///
/// # Example
///
/// ```
/// use boundary_eval::metrics::average_precision;
///
/// // constant precision 1.0 over recall [0, 1] integrates to ~1
/// let recalls: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
/// let precisions = vec![1.0; 101];
/// let ap = average_precision(&recalls, &precisions);
/// assert!((ap - 1.0).abs() < 1e-9);
///
/// // a flat curve has a single unique recall value
/// assert_eq!(average_precision(&[0.4, 0.4], &[0.7, 0.9]), 0.0);
/// ```
#[must_use]
pub fn average_precision(recalls: &[f64], precisions: &[f64]) -> f64 {
    let n = recalls.len().min(precisions.len());
    if n == 0 {
        return 0.0;
    }

    // Unique recall values ascending, precision taken at the first occurrence.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        recalls[a]
            .partial_cmp(&recalls[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut rec_unique: Vec<f64> = Vec::with_capacity(n);
    let mut prec_unique: Vec<f64> = Vec::with_capacity(n);
    for &i in &order {
        if rec_unique.last() != Some(&recalls[i]) {
            rec_unique.push(recalls[i]);
            prec_unique.push(precisions[i]);
        }
    }

    if rec_unique.len() < 2 {
        return 0.0;
    }

    let sum: f64 = (0..100)
        .map(|i| interp(i as f64 * 0.01, &rec_unique, &prec_unique))
        .sum();
    sum * 0.01
}

/// Piecewise-linear interpolation of `ys` over ascending `xs` at `x`.
/// Values outside `[xs[0], xs[last]]` map to 0.
fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let last = xs.len() - 1;
    if x < xs[0] || x > xs[last] {
        return 0.0;
    }
    // first index with xs[j] >= x
    let j = xs.partition_point(|&v| v < x);
    if xs[j] == x {
        return ys[j];
    }
    let (x0, x1) = (xs[j - 1], xs[j]);
    let (y0, y1) = (ys[j - 1], ys[j]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
