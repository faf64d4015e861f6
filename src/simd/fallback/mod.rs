//! Scalar fallback for targets without AVX2 or NEON.

/// Writes `out[j] = exp(-(axis[j] - center)²)` for every `j`.
#[inline(always)]
pub fn gaussian_row(center: f64, axis: &[f64], out: &mut [f64]) {
    debug_assert_eq!(axis.len(), out.len(), "axis and out must be the same length");

    for (o, &x) in out.iter_mut().zip(axis.iter()) {
        let d = x - center;
        *o = (-(d * d)).exp();
    }
}
