use crate::core::types::Sample;

/// Normalized cross-correlation between two sample windows.
///
/// Sums are accumulated in `f64`: a thousand products of magnitude up to
/// 2^30 would overflow or lose precision in narrower types. Returns 0 when
/// either window is silent. If the windows differ in length only the common
/// prefix is used.
#[inline]
pub fn normalized_cross_correlation(x: &[Sample], y: &[Sample]) -> f64 {
    let mut sum_xy = 0.0f64;
    let mut sum_x2 = 0.0f64;
    let mut sum_y2 = 0.0f64;

    for (&a, &b) in x.iter().zip(y) {
        let va = a as f64;
        let vb = b as f64;
        sum_xy += va * vb;
        sum_x2 += va * va;
        sum_y2 += vb * vb;
    }

    let denom = (sum_x2 * sum_y2).sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    sum_xy / denom
}
