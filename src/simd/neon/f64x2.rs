//! NEON 2-lane f64 SIMD vector.
//!
//! `F64x2` wraps the AArch64 `float64x2_t` register. NEON has no wide masked
//! memory operations, so the partial case (a single valid lane) goes through
//! lane extract/insert instead of a mask table.

use std::arch::aarch64::*;

use std::ops::{Add, Mul, Neg, Sub};

use crate::simd::{neon::math::*, Alignment, SimdLoad, SimdMath, SimdStore};

/// Preferred NEON alignment in bytes.
pub(crate) const NEON_ALIGNMENT: usize = 16;

/// Number of f64 elements in one 128-bit NEON vector.
pub(crate) const LANE_COUNT: usize = 2;

/// NEON SIMD vector containing 2 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    /// Number of valid elements in the vector (1-2).
    pub size: usize,
    /// NEON 128-bit register holding 2 packed f64 values.
    pub elements: float64x2_t,
}

impl F64x2 {
    /// Broadcasts a single value to both lanes.
    #[inline(always)]
    pub fn splat(value: f64) -> Self {
        Self {
            size: LANE_COUNT,
            elements: unsafe { vdupq_n_f64(value) },
        }
    }
}

impl Alignment<f64> for F64x2 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        let ptr = ptr as usize;

        ptr % NEON_ALIGNMENT == 0
    }
}

impl From<&[f64]> for F64x2 {
    fn from(slice: &[f64]) -> Self {
        debug_assert!(!slice.is_empty(), "data pointer can't be NULL");

        let size = slice.len();

        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { Self::load_partial(slice.as_ptr(), size) },
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load(slice.as_ptr(), LANE_COUNT)
            },
        }
    }
}

impl SimdLoad<f64> for F64x2 {
    type Output = Self;

    #[inline(always)]
    unsafe fn load(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        // NEON loads are alignment-agnostic; both paths use vld1q.
        unsafe { Self::load_unaligned(ptr) }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: vld1q_f64(ptr),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: vld1q_f64(ptr),
            size: LANE_COUNT,
        }
    }

    /// Loads a single element into lane 0; lane 1 is zero.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vsetq_lane_f64::<0>(ptr.read(), vdupq_n_f64(0.0)),
            size,
        }
    }
}

impl SimdStore<f64> for F64x2 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f64) {
        debug_assert!(self.size <= LANE_COUNT, "Size must be <= {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match self.size.cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { self.store_at_partial(ptr) },
            std::cmp::Ordering::Equal => unsafe { self.store_unaligned_at(ptr) },
            std::cmp::Ordering::Greater => unreachable!("Size cannot exceed LANE_COUNT"),
        }
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f64) {
        vst1q_f64(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        vst1q_f64(ptr, self.elements)
    }

    /// Stores only lane 0.
    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f64) {
        debug_assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        ptr.write(vgetq_lane_f64::<0>(self.elements));
    }
}

impl SimdMath for F64x2 {
    type Output = Self;

    /// Vectorized `e^x` over both lanes.
    #[inline(always)]
    fn exp(&self) -> Self::Output {
        Self {
            size: self.size,
            elements: unsafe { vexpq_f64(self.elements) },
        }
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { vaddq_f64(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { vsubq_f64(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        debug_assert!(
            self.size == rhs.size,
            "Operands must have the same size (got {} and {})",
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { vmulq_f64(self.elements, rhs.elements) },
        }
    }
}

impl Neg for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            size: self.size,
            elements: unsafe { vnegq_f64(self.elements) },
        }
    }
}
