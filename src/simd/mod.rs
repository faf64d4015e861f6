//! SIMD backends for the Gaussian profile kernel.
//!
//! The build script probes the host CPU and emits exactly one of
//! `cfg(avx2)`, `cfg(neon)`, or `cfg(fallback)`; the matching backend module
//! is compiled and its [`gaussian_row`] becomes the crate-wide vectorized
//! profile kernel. Cross-compiled builds always take the scalar fallback.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod fallback;

#[cfg(avx2)]
pub use avx2::slice::gaussian_row;

#[cfg(neon)]
pub use neon::slice::gaussian_row;

#[cfg(not(any(avx2, neon)))]
pub use fallback::gaussian_row;

/// Pointer alignment check for a SIMD vector type.
pub trait Alignment<T> {
    /// Returns `true` if `ptr` satisfies the backend's alignment requirement.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Loading elements from memory into a SIMD vector.
pub trait SimdLoad<T>: Sized {
    type Output;

    /// Loads exactly one full vector from `ptr`, choosing aligned or
    /// unaligned access based on the pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `size` valid values of `T`, and `size`
    /// must equal the backend lane count.
    unsafe fn load(ptr: *const T, size: usize) -> Self::Output;

    /// Loads one full vector from aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must meet the backend alignment and point to a full vector.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads one full vector from unaligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a full vector of valid values.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;

    /// Loads fewer than a full vector of elements; the remaining lanes are
    /// unspecified and must not be stored with a full-width store.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `size` valid values, `size` below the
    /// backend lane count.
    unsafe fn load_partial(ptr: *const T, size: usize) -> Self::Output;
}

/// Storing a SIMD vector back to memory.
pub trait SimdStore<T> {
    /// Stores the vector at `ptr`, dispatching on the vector's element count
    /// (partial store) and the pointer's alignment (aligned/unaligned).
    ///
    /// # Safety
    ///
    /// `ptr` must point to writable memory for the vector's element count.
    unsafe fn store_at(&self, ptr: *mut T);

    /// Stores one full vector to aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must meet the backend alignment and be writable for a full
    /// vector.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// Stores one full vector to unaligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be writable for a full vector.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);

    /// Stores only the vector's valid elements using a masked store.
    ///
    /// # Safety
    ///
    /// `ptr` must be writable for the vector's element count, which must be
    /// below the backend lane count.
    unsafe fn store_at_partial(&self, ptr: *mut T);
}

/// Vectorized mathematical functions.
pub trait SimdMath {
    type Output;

    /// Computes `e^x` for every lane.
    fn exp(&self) -> Self::Output;
}
