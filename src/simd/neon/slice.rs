//! NEON Gaussian profile kernel over f64 slices.
//!
//! Mirrors the AVX2 kernel on 2-lane vectors: complete blocks first, then a
//! single-lane tail.

use crate::simd::{
    neon::f64x2::{self, F64x2},
    SimdLoad, SimdMath, SimdStore,
};

/// Writes `out[j] = exp(-(axis[j] - center)²)` for every `j`.
///
/// # Panics
///
/// Panics in debug builds if `axis` and `out` differ in length.
#[inline(always)]
pub fn gaussian_row(center: f64, axis: &[f64], out: &mut [f64]) {
    debug_assert_eq!(axis.len(), out.len(), "axis and out must be the same length");

    let size = axis.len();
    let step = f64x2::LANE_COUNT;

    let complete_lanes = size - (size % step);
    let remaining_lanes = size - complete_lanes;

    let center = F64x2::splat(center);

    for i in (0..complete_lanes).step_by(step) {
        gaussian_block(&axis[i], &mut out[i], center);
    }

    if remaining_lanes > 0 {
        gaussian_partial_block(
            &axis[complete_lanes],
            &mut out[complete_lanes],
            center,
            remaining_lanes,
        );
    }
}

/// Processes one complete 2-element block.
#[inline(always)]
fn gaussian_block(axis: *const f64, out: *mut f64, center: F64x2) {
    let x = unsafe { F64x2::load(axis, f64x2::LANE_COUNT) };

    let d = x - center;
    let intensity = (-(d * d)).exp();

    unsafe { intensity.store_at(out) };
}

/// Processes the trailing single element.
#[inline(always)]
fn gaussian_partial_block(axis: *const f64, out: *mut f64, center: F64x2, size: usize) {
    let x = unsafe { F64x2::load_partial(axis, size) };

    let center = F64x2 {
        size,
        elements: center.elements,
    };

    let d = x - center;
    let intensity = (-(d * d)).exp();

    unsafe { intensity.store_at_partial(out) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_row_matches_scalar() {
        let axis: Vec<f64> = (0..9).map(|i| i as f64 * 0.41).collect();
        let center = 1.7;

        let mut out = vec![0.0; axis.len()];
        gaussian_row(center, &axis, &mut out);

        for (j, (&x, &got)) in axis.iter().zip(out.iter()).enumerate() {
            let expected = (-(x - center) * (x - center)).exp();
            assert!(
                (got - expected).abs() < 1e-12,
                "lane {j}: expected {expected}, got {got}"
            );
        }
    }
}
