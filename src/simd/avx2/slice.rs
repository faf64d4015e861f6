//! AVX2 Gaussian profile kernel over f64 slices.
//!
//! The 1D profile of a point source at `center` sampled on an `axis` is
//! `exp(-(axis[j] - center)²)`. Evaluating it vectorized is what makes the
//! separable PSF factorization pay off: the per-frame cost is two thin
//! profile matrices plus one GEMM, and the profiles are pure elementwise
//! exponentials.
//!
//! The kernel processes complete 4-lane blocks and finishes with one masked
//! partial block, so any axis length is handled without scalar tails.

use crate::simd::{
    avx2::f64x4::{self, F64x4},
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
    let step = f64x4::LANE_COUNT;

    let complete_lanes = size - (size % step);
    let remaining_lanes = size - complete_lanes;

    let center = F64x4::splat(center);

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

/// Processes one complete 4-element block.
#[inline(always)]
fn gaussian_block(axis: *const f64, out: *mut f64, center: F64x4) {
    let x = unsafe { F64x4::load(axis, f64x4::LANE_COUNT) };

    let d = x - center;
    let intensity = (-(d * d)).exp();

    unsafe { intensity.store_at(out) };
}

/// Processes a trailing block of 1-3 elements with masked memory access.
#[inline(always)]
fn gaussian_partial_block(axis: *const f64, out: *mut f64, center: F64x4, size: usize) {
    let x = unsafe { F64x4::load_partial(axis, size) };

    // The splat carries a full lane count; narrow it to match the partial load.
    let center = F64x4 {
        size,
        elements: center.elements,
    };

    let d = x - center;
    let intensity = (-(d * d)).exp();

    unsafe { intensity.store_at_partial(out) };
}
