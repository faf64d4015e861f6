//! NEON mathematical kernels for packed f64 vectors.
//!
//! Same derivation as the AVX2 kernel: Cephes-split range reduction, a
//! degree-11 Horner polynomial for `exp(r)` with `|r| ≤ ln(2)/2`, and
//! reconstruction of `2^n` through the IEEE 754 exponent field. Out-of-range
//! inputs saturate to `+∞` / `0.0`; NaN propagates.

use std::arch::aarch64::*;

/// High part of the ln(2) split; exactly representable in f64.
const EXP_LN2_HI: f64 = 6.931_457_519_531_25e-1;

/// Low part of the ln(2) split.
const EXP_LN2_LO: f64 = 1.428_606_820_309_417_2e-6;

/// Inputs above this overflow f64.
const EXP_MAX_INPUT: f64 = 709.782_712_893_384;

/// Inputs below this underflow to zero (subnormal results are flushed).
const EXP_MIN_INPUT: f64 = -708.396_418_532_264;

/// Computes `e^x` for 2 packed f64 values.
///
/// # Safety
///
/// Requires NEON support; the build script only compiles this module when
/// the target advertises it.
#[inline(always)]
pub unsafe fn vexpq_f64(x: float64x2_t) -> float64x2_t {
    let log2e = vdupq_n_f64(std::f64::consts::LOG2_E);
    let ln2_hi = vdupq_n_f64(EXP_LN2_HI);
    let ln2_lo = vdupq_n_f64(EXP_LN2_LO);

    let is_large = vcgtq_f64(x, vdupq_n_f64(EXP_MAX_INPUT));
    let is_small = vcltq_f64(x, vdupq_n_f64(EXP_MIN_INPUT));
    let is_ordered = vceqq_f64(x, x);

    // Range reduction: n = round(x / ln(2)), r = x - n*ln(2).
    let n_float = vrndnq_f64(vmulq_f64(x, log2e));

    let mut r = vfmsq_f64(x, n_float, ln2_hi);
    r = vfmsq_f64(r, n_float, ln2_lo);

    // Taylor coefficients 1/k! for k = 2..=11, Horner order.
    let c2 = vdupq_n_f64(0.5);
    let c3 = vdupq_n_f64(1.0 / 6.0);
    let c4 = vdupq_n_f64(1.0 / 24.0);
    let c5 = vdupq_n_f64(1.0 / 120.0);
    let c6 = vdupq_n_f64(1.0 / 720.0);
    let c7 = vdupq_n_f64(1.0 / 5_040.0);
    let c8 = vdupq_n_f64(1.0 / 40_320.0);
    let c9 = vdupq_n_f64(1.0 / 362_880.0);
    let c10 = vdupq_n_f64(1.0 / 3_628_800.0);
    let c11 = vdupq_n_f64(1.0 / 39_916_800.0);

    let one = vdupq_n_f64(1.0);

    let mut poly = vfmaq_f64(c10, c11, r);
    poly = vfmaq_f64(c9, poly, r);
    poly = vfmaq_f64(c8, poly, r);
    poly = vfmaq_f64(c7, poly, r);
    poly = vfmaq_f64(c6, poly, r);
    poly = vfmaq_f64(c5, poly, r);
    poly = vfmaq_f64(c4, poly, r);
    poly = vfmaq_f64(c3, poly, r);
    poly = vfmaq_f64(c2, poly, r);
    poly = vfmaq_f64(one, poly, r);
    poly = vfmaq_f64(one, poly, r);

    // Reconstruct 2^n in the exponent field: (n + 1023) << 52.
    let n_i64 = vcvtq_s64_f64(n_float);
    let n_biased = vaddq_s64(n_i64, vdupq_n_s64(1023));
    let scale = vreinterpretq_f64_s64(vshlq_n_s64::<52>(n_biased));

    let result = vmulq_f64(poly, scale);

    // Resolve special cases: saturate the range limits, pass NaN through.
    let mut final_result = result;
    final_result = vbslq_f64(is_large, vdupq_n_f64(f64::INFINITY), final_result);
    final_result = vbslq_f64(is_small, vdupq_n_f64(0.0), final_result);
    final_result = vbslq_f64(is_ordered, final_result, x);

    final_result
}
