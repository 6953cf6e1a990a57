//! The shared contract every backend implements.
//!
//! Each vector type, the unrolled engine and every wide-register wrapper
//! alike, implements the same set of traits, so numeric code written once
//! against
//! these bounds retargets to a different backend without source changes.
//!
//! The split mirrors the operation families: pointer loads ([`SimdLoad`]),
//! pointer stores ([`SimdStore`]), lanewise comparison ([`SimdCompare`]),
//! unary math ([`SimdMath`]), fused trinary arithmetic ([`SimdFused`]) and
//! conditional select ([`SimdSelect`]). Binary `+ - * /` and their compound
//! forms are the standard operator traits on each type.

/// Pointer-alignment probe for a backend's declared alignment.
pub trait Alignment<T> {
    /// Returns `true` when `ptr` satisfies the alignment the backend's
    /// aligned load/store path requires.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Construction from a scalar or from raw memory.
///
/// The three load methods are the three access disciplines of
/// [`crate::simd::mem`]. None of them checks bounds: the caller guarantees the
/// pointer references at least one full vector of elements.
pub trait SimdLoad<T>: Sized {
    /// Broadcasts `value` into every lane.
    fn splat(value: T) -> Self;

    /// Loads one full vector from `ptr` under the default (aligned) mode.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned to the backend's declared alignment,
    /// and reference at least one full vector of valid elements. A misaligned
    /// pointer is undefined behavior, typically a fault on hardware backends.
    unsafe fn load(ptr: *const T) -> Self;

    /// Loads one full vector from `ptr` with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and reference at least one full vector of valid
    /// elements.
    unsafe fn load_unaligned(ptr: *const T) -> Self;

    /// Loads one full vector from `ptr` with a non-temporal hint.
    ///
    /// The implementation is permitted, but not required, to bypass the cache
    /// hierarchy. Alignment requirements match [`SimdLoad::load`].
    ///
    /// # Safety
    ///
    /// Same contract as [`SimdLoad::load`].
    unsafe fn load_stream(ptr: *const T) -> Self;
}

/// Writing a vector back to raw memory.
pub trait SimdStore<T> {
    /// Stores all lanes to `ptr` under the default (aligned) mode.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned to the backend's declared alignment,
    /// and reference at least one full vector of writable elements.
    unsafe fn store_at(&self, ptr: *mut T);

    /// Stores all lanes to `ptr` with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and reference at least one full vector of
    /// writable elements.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);

    /// Stores all lanes to `ptr` with a non-temporal hint.
    ///
    /// The write is visible to the issuing thread's subsequent reads, but is
    /// not ordered with respect to other threads until the caller issues
    /// [`crate::simd::mem::stream_fence`]. Alignment requirements match
    /// [`SimdStore::store_at`].
    ///
    /// # Safety
    ///
    /// Same contract as [`SimdStore::store_at`].
    unsafe fn stream_at(&self, ptr: *mut T);
}

/// Lanewise comparison under the mask-as-numeric convention.
///
/// Every method returns a vector of the same scalar type whose lane `i` is
/// exactly one where the scalar comparison holds for lane `i` of the operands
/// and exactly zero where it does not, for every input including NaN.
/// NaN lanes compare false under the ordered predicates (`eq lt le gt ge`)
/// and true under `simd_ne`, matching scalar Rust semantics.
///
/// This {0, 1} guarantee is the invariant [`SimdSelect::cond`] relies on; a
/// backend producing any other lane value breaks conditional select and every
/// operation derived from it.
///
/// Like arithmetic, comparison accepts vector-vector, vector-scalar and
/// scalar-vector operand pairs; the `Rhs` parameter follows the `std::ops`
/// pattern, and a scalar operand broadcasts before comparing.
pub trait SimdCompare<Rhs = Self> {
    /// The mask vector type, the vector operand's own type.
    type Output;

    /// Lanewise `==`.
    fn simd_eq(self, rhs: Rhs) -> Self::Output;
    /// Lanewise `!=` (true for NaN lanes).
    fn simd_ne(self, rhs: Rhs) -> Self::Output;
    /// Lanewise `<`.
    fn simd_lt(self, rhs: Rhs) -> Self::Output;
    /// Lanewise `<=`.
    fn simd_le(self, rhs: Rhs) -> Self::Output;
    /// Lanewise `>`.
    fn simd_gt(self, rhs: Rhs) -> Self::Output;
    /// Lanewise `>=`.
    fn simd_ge(self, rhs: Rhs) -> Self::Output;
}

/// Fused trinary arithmetic: one product and one sum per lane in a single
/// rounding step, where the underlying primitive supports it.
pub trait SimdFused: Sized {
    /// `self * b + c` per lane.
    fn fma(self, b: Self, c: Self) -> Self;
    /// `self * b - c` per lane.
    fn fms(self, b: Self, c: Self) -> Self;
    /// `-(self * b) + c` per lane.
    fn fnma(self, b: Self, c: Self) -> Self;
    /// `-(self * b) - c` per lane.
    fn fnms(self, b: Self, c: Self) -> Self;
}

/// Lanewise unary operations.
///
/// `rsqrt` and `rcp` trade accuracy for speed on hardware backends; see the
/// crate-level precision contract.
pub trait SimdMath: Sized {
    /// Lanewise negation.
    fn neg(&self) -> Self;
    /// Lanewise absolute value.
    fn abs(&self) -> Self;
    /// Lanewise rounding toward positive infinity.
    fn ceil(&self) -> Self;
    /// Lanewise rounding toward negative infinity.
    fn floor(&self) -> Self;
    /// Lanewise rounding to the nearest integer.
    fn round(&self) -> Self;
    /// Lanewise rounding toward zero.
    fn trunc(&self) -> Self;
    /// Lanewise square root.
    fn sqrt(&self) -> Self;
    /// Lanewise reciprocal square root, possibly approximate.
    fn rsqrt(&self) -> Self;
    /// Lanewise reciprocal, possibly approximate.
    fn rcp(&self) -> Self;
}

/// Branch-free conditional select driven by a numeric mask.
pub trait SimdSelect: Sized {
    /// Selects `pass` where `self` is one and `fail` where `self` is zero,
    /// computed as `self * pass + (1 - self) * fail`.
    ///
    /// Every lane of `self` must be exactly zero or one, the values produced
    /// by [`SimdCompare`]. Any other mask value blends the operands instead
    /// of selecting one of them.
    fn cond(self, pass: Self, fail: Self) -> Self;
}
