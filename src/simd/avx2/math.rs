//! AVX2 mathematical kernels for packed f64 vectors.
//!
//! The exponential is the only transcendental this crate needs: the Gaussian
//! profile kernel is one subtraction, one multiplication, and one `exp` per
//! pixel. The implementation follows the classic Cephes recipe:
//!
//! 1. **Range reduction**: `x = n·ln(2) + r` with `|r| ≤ ln(2)/2`, using a
//!    two-constant split of `ln(2)` so the reduction itself stays exact to
//!    double precision.
//! 2. **Polynomial**: degree-11 Taylor evaluation of `exp(r)` in Horner form
//!    (truncation error ≈ 6e-15 relative at the interval edge).
//! 3. **Reconstruction**: `exp(x) = 2^n · exp(r)`, building `2^n` directly in
//!    the IEEE 754 exponent field.
//!
//! Inputs past the overflow/underflow thresholds and NaN are blended to
//! `+∞`, `0.0`, and the input respectively. Underflow snaps to zero without
//! entering the subnormal range; for this crate that is the desired Gaussian
//! decay behavior, not an error.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// High part of the ln(2) split; exactly representable in f64.
const EXP_LN2_HI: f64 = 6.931_457_519_531_25e-1;

/// Low part of the ln(2) split.
const EXP_LN2_LO: f64 = 1.428_606_820_309_417_2e-6;

/// Inputs above this overflow f64: exp(709.79) > f64::MAX.
const EXP_MAX_INPUT: f64 = 709.782_712_893_384;

/// Inputs below this underflow to zero (subnormal results are flushed).
const EXP_MIN_INPUT: f64 = -708.396_418_532_264;

/// Computes `e^x` for 4 packed f64 values.
///
/// # Safety
///
/// Requires AVX2 and FMA support; the build script only compiles this module
/// when the host CPU advertises them.
#[inline(always)]
pub unsafe fn _mm256_exp_pd(x: __m256d) -> __m256d {
    let log2e = _mm256_set1_pd(std::f64::consts::LOG2_E);
    let ln2_hi = _mm256_set1_pd(EXP_LN2_HI);
    let ln2_lo = _mm256_set1_pd(EXP_LN2_LO);

    let max_input = _mm256_set1_pd(EXP_MAX_INPUT);
    let min_input = _mm256_set1_pd(EXP_MIN_INPUT);

    // Special-case masks, resolved after the main computation.
    let is_large = _mm256_cmp_pd::<_CMP_GT_OQ>(x, max_input);
    let is_small = _mm256_cmp_pd::<_CMP_LT_OQ>(x, min_input);
    let is_nan = _mm256_cmp_pd::<_CMP_NEQ_UQ>(x, x);

    // Range reduction: n = round(x / ln(2)), r = x - n*ln(2).
    let n_float = _mm256_round_pd::<_MM_FROUND_TO_NEAREST_INT>(_mm256_mul_pd(x, log2e));

    let mut r = _mm256_fnmadd_pd(n_float, ln2_hi, x); // x - n*ln2_hi
    r = _mm256_fnmadd_pd(n_float, ln2_lo, r); // (x - n*ln2_hi) - n*ln2_lo

    // Taylor coefficients 1/k! for k = 2..=11.
    let c2 = _mm256_set1_pd(0.5);
    let c3 = _mm256_set1_pd(1.0 / 6.0);
    let c4 = _mm256_set1_pd(1.0 / 24.0);
    let c5 = _mm256_set1_pd(1.0 / 120.0);
    let c6 = _mm256_set1_pd(1.0 / 720.0);
    let c7 = _mm256_set1_pd(1.0 / 5_040.0);
    let c8 = _mm256_set1_pd(1.0 / 40_320.0);
    let c9 = _mm256_set1_pd(1.0 / 362_880.0);
    let c10 = _mm256_set1_pd(1.0 / 3_628_800.0);
    let c11 = _mm256_set1_pd(1.0 / 39_916_800.0);

    let one = _mm256_set1_pd(1.0);

    // Horner evaluation of 1 + r + r²/2! + ... + r¹¹/11!.
    let mut poly = _mm256_fmadd_pd(c11, r, c10);
    poly = _mm256_fmadd_pd(poly, r, c9);
    poly = _mm256_fmadd_pd(poly, r, c8);
    poly = _mm256_fmadd_pd(poly, r, c7);
    poly = _mm256_fmadd_pd(poly, r, c6);
    poly = _mm256_fmadd_pd(poly, r, c5);
    poly = _mm256_fmadd_pd(poly, r, c4);
    poly = _mm256_fmadd_pd(poly, r, c3);
    poly = _mm256_fmadd_pd(poly, r, c2);
    poly = _mm256_fmadd_pd(poly, r, one);
    poly = _mm256_fmadd_pd(poly, r, one);

    // Reconstruct 2^n in the exponent field: (n + 1023) << 52.
    let n_i32 = _mm256_cvtpd_epi32(n_float);
    let n_i64 = _mm256_cvtepi32_epi64(n_i32);
    let bias = _mm256_set1_epi64x(1023);
    let n_biased = _mm256_add_epi64(n_i64, bias);
    let scale = _mm256_castsi256_pd(_mm256_slli_epi64::<52>(n_biased));

    let result = _mm256_mul_pd(poly, scale);

    // Resolve special cases with IEEE semantics.
    let mut final_result = result;
    final_result = _mm256_blendv_pd(final_result, _mm256_set1_pd(f64::INFINITY), is_large);
    final_result = _mm256_blendv_pd(final_result, _mm256_setzero_pd(), is_small);
    final_result = _mm256_blendv_pd(final_result, x, is_nan);

    final_result
}
