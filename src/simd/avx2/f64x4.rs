//! AVX2 4-lane f64 SIMD vector.
//!
//! `F64x4` wraps Intel's `__m256d` register to operate on 4 double-precision
//! values at once. Partial vectors (1-3 valid lanes) are supported through
//! masked loads and stores so slice kernels never read or write past their
//! buffers.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul, Neg, Sub};

use crate::simd::{avx2::math::*, Alignment, SimdLoad, SimdMath, SimdStore};

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f64 elements in one 256-bit AVX2 vector.
pub(crate) const LANE_COUNT: usize = 4;

/// AVX2 SIMD vector containing 4 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x4 {
    /// Number of valid elements in the vector (1-4).
    pub size: usize,
    /// AVX2 256-bit register holding 4 packed f64 values.
    pub elements: __m256d,
}

impl F64x4 {
    /// Broadcasts a single value to all 4 lanes.
    #[inline(always)]
    pub fn splat(value: f64) -> Self {
        Self {
            size: LANE_COUNT,
            elements: unsafe { _mm256_set1_pd(value) },
        }
    }
}

impl Alignment<f64> for F64x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        let ptr = ptr as usize;

        ptr % AVX_ALIGNMENT == 0
    }
}

impl From<&[f64]> for F64x4 {
    /// Loads from a slice, selecting a full or masked partial load based on
    /// the slice length. Slices longer than 4 load their first 4 elements.
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

impl SimdLoad<f64> for F64x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn load(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F64x4::is_aligned(ptr) {
            true => unsafe { Self::load_aligned(ptr) },
            false => unsafe { Self::load_unaligned(ptr) },
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: _mm256_load_pd(ptr),
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: _mm256_loadu_pd(ptr),
            size: LANE_COUNT,
        }
    }

    /// Masked load of 1-3 elements; unloaded lanes are zero.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mask = match size {
            1 => _mm256_setr_epi64x(-1, 0, 0, 0),
            2 => _mm256_setr_epi64x(-1, -1, 0, 0),
            3 => _mm256_setr_epi64x(-1, -1, -1, 0),
            _ => unreachable!(),
        };

        Self {
            elements: _mm256_maskload_pd(ptr, mask),
            size,
        }
    }
}

impl SimdStore<f64> for F64x4 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f64) {
        debug_assert!(self.size <= LANE_COUNT, "Size must be <= {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match self.size.cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { self.store_at_partial(ptr) },
            std::cmp::Ordering::Equal => match F64x4::is_aligned(ptr) {
                true => unsafe { self.store_aligned_at(ptr) },
                false => unsafe { self.store_unaligned_at(ptr) },
            },
            std::cmp::Ordering::Greater => unreachable!("Size cannot exceed LANE_COUNT"),
        }
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f64) {
        _mm256_store_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, self.elements)
    }

    /// Masked store writing only the first `self.size` lanes.
    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f64) {
        debug_assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mask: __m256i = match self.size {
            1 => _mm256_setr_epi64x(-1, 0, 0, 0),
            2 => _mm256_setr_epi64x(-1, -1, 0, 0),
            3 => _mm256_setr_epi64x(-1, -1, -1, 0),
            _ => unreachable!(),
        };

        _mm256_maskstore_pd(ptr, mask, self.elements);
    }
}

impl SimdMath for F64x4 {
    type Output = Self;

    /// Vectorized `e^x` over all lanes.
    #[inline(always)]
    fn exp(&self) -> Self::Output {
        Self {
            size: self.size,
            elements: unsafe { _mm256_exp_pd(self.elements) },
        }
    }
}

impl Add for F64x4 {
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
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F64x4 {
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
            elements: unsafe { _mm256_sub_pd(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x4 {
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
            elements: unsafe { _mm256_mul_pd(self.elements, rhs.elements) },
        }
    }
}

impl Neg for F64x4 {
    type Output = Self;

    /// Flips the sign bit of every lane.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            size: self.size,
            elements: unsafe { _mm256_xor_pd(self.elements, _mm256_set1_pd(-0.0)) },
        }
    }
}
