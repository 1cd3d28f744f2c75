// Percentile Estimator - interpolated order statistics

/// Percentile of an ascending-sorted sample using linear interpolation between
/// order statistics (index = (n - 1) * p).
///
/// Returns 0.0 for an empty sample. `p` is clamped to [0, 1].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;

    if lo == hi {
        return sorted[lo];
    }

    let weight = index - lo as f64;
    sorted[lo] + weight * (sorted[hi] - sorted[lo])
}
