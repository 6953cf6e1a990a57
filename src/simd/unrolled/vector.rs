//! Generic fixed-extent vector with compile-time-unrolled lane dispatch.
//!
//! [`Simd<T, N>`] holds exactly `N` scalar lanes in a plain array. Every
//! lanewise operation is expressed through [`core::array::from_fn`] over the
//! const lane count, so the iteration bound is a compile-time constant the
//! optimizer fully unrolls: there is no runtime-variable loop and no dynamic
//! dispatch anywhere on the arithmetic path. A strong
//! optimizing compiler maps the unrolled scalar code onto hardware vector
//! instructions when profitable; the wide-register wrappers exist for the
//! cases where that must not be left to chance.
//!
//! Mixing two vectors of different extent or scalar type is rejected by the
//! type system; there is no implicit broadcasting across mismatched extents.

use core::array;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use num::Float;

use crate::simd::mem::AccessMode;
use crate::simd::traits::{
    Alignment, SimdCompare, SimdFused, SimdLoad, SimdMath, SimdSelect, SimdStore,
};

/// A fixed-width vector of `N` lanes of `T`.
///
/// The layout is exactly `[T; N]`; alignment is the array's natural alignment.
/// Callers who need the wider alignment of a hardware register (for the
/// aligned and streaming access modes) allocate through
/// [`crate::utils::AlignedBuffer`].
///
/// # Examples
///
/// ```rust
/// use lanewise::simd::unrolled::Simd;
///
/// let a = Simd::from_lanes([1.0f64, 2.0, 3.0, 4.0]);
/// let b = Simd::from_lanes([10.0f64, 20.0, 30.0, 40.0]);
/// let sum = a + b;
/// assert_eq!(sum.to_array(), [11.0, 22.0, 33.0, 44.0]);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(transparent)]
pub struct Simd<T, const N: usize> {
    lanes: [T; N],
}

impl<T: Float, const N: usize> Simd<T, N> {
    /// Number of lanes.
    pub const LANES: usize = N;

    /// Broadcasts `value` into all `N` lanes.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self { lanes: [value; N] }
    }

    /// Builds a vector from an explicit per-lane list.
    ///
    /// The arity is the array type itself, so a wrong lane count is a type
    /// error, not a runtime check.
    #[inline(always)]
    pub const fn from_lanes(lanes: [T; N]) -> Self {
        Self { lanes }
    }

    /// Builds a vector by evaluating `f` for every lane index in ascending
    /// order: lane `i = f(i)`.
    ///
    /// ```rust
    /// use lanewise::simd::unrolled::Simd;
    ///
    /// let ramp: Simd<f64, 4> = Simd::from_fn(|i| i as f64);
    /// assert_eq!(ramp.to_array(), [0.0, 1.0, 2.0, 3.0]);
    /// ```
    #[inline(always)]
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Self {
            lanes: array::from_fn(f),
        }
    }

    /// Copies the lanes out as a plain array.
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.lanes
    }

    /// Borrows the lanes as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    /// Loads a vector from `ptr` under the access mode chosen by the `M`
    /// marker type.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdLoad`] method applies.
    #[inline(always)]
    pub unsafe fn load_with<M: AccessMode>(ptr: *const T) -> Self {
        M::load(ptr)
    }

    /// Stores the vector to `ptr` under the access mode chosen by the `M`
    /// marker type.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdStore`] method applies.
    #[inline(always)]
    pub unsafe fn store_with<M: AccessMode>(&self, ptr: *mut T) {
        M::store(self, ptr)
    }
}

impl<T: Float, const N: usize> Alignment<T> for Simd<T, N> {
    #[inline(always)]
    fn is_aligned(ptr: *const T) -> bool {
        ptr as usize % core::mem::align_of::<Self>() == 0
    }
}

impl<T: Float, const N: usize> SimdLoad<T> for Simd<T, N> {
    #[inline(always)]
    fn splat(value: T) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");

        Self {
            lanes: (ptr as *const [T; N]).read(),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const T) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            lanes: (ptr as *const [T; N]).read_unaligned(),
        }
    }

    // The portable engine has no non-temporal instruction to reach for; the
    // streaming mode is serviced by the aligned path, which the access-mode
    // contract permits.
    #[inline(always)]
    unsafe fn load_stream(ptr: *const T) -> Self {
        Self::load(ptr)
    }
}

impl<T: Float, const N: usize> SimdStore<T> for Simd<T, N> {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut T) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be aligned");

        (ptr as *mut [T; N]).write(self.lanes);
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut T) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        (ptr as *mut [T; N]).write_unaligned(self.lanes);
    }

    #[inline(always)]
    unsafe fn stream_at(&self, ptr: *mut T) {
        self.store_at(ptr);
    }
}

/// Immutable lane access, 0-based. Panics outside `[0, N)`.
impl<T, const N: usize> Index<usize> for Simd<T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.lanes[index]
    }
}

/// Mutable lane access, 0-based. Panics outside `[0, N)`.
impl<T, const N: usize> IndexMut<usize> for Simd<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.lanes[index]
    }
}

impl<T: Float, const N: usize> Add for Simd<T, N> {
    type Output = Self;

    /// Lanewise addition.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.lanes[i] + rhs.lanes[i])
    }
}

impl<T: Float, const N: usize> Sub for Simd<T, N> {
    type Output = Self;

    /// Lanewise subtraction.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.lanes[i] - rhs.lanes[i])
    }
}

impl<T: Float, const N: usize> Mul for Simd<T, N> {
    type Output = Self;

    /// Lanewise multiplication.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.lanes[i] * rhs.lanes[i])
    }
}

impl<T: Float, const N: usize> Div for Simd<T, N> {
    type Output = Self;

    /// Lanewise division.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.lanes[i] / rhs.lanes[i])
    }
}

// vector (.) scalar, scalar broadcast on the right

impl<T: Float, const N: usize> Add<T> for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: T) -> Self {
        Self::from_fn(|i| self.lanes[i] + rhs)
    }
}

impl<T: Float, const N: usize> Sub<T> for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: T) -> Self {
        Self::from_fn(|i| self.lanes[i] - rhs)
    }
}

impl<T: Float, const N: usize> Mul<T> for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: T) -> Self {
        Self::from_fn(|i| self.lanes[i] * rhs)
    }
}

impl<T: Float, const N: usize> Div<T> for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: T) -> Self {
        Self::from_fn(|i| self.lanes[i] / rhs)
    }
}

// scalar (.) vector; the orphan rule demands concrete scalar types here
macro_rules! impl_scalar_lhs {
    ($scalar:ty) => {
        impl<const N: usize> Add<Simd<$scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn add(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::from_fn(|i| self + rhs[i])
            }
        }

        impl<const N: usize> Sub<Simd<$scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn sub(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::from_fn(|i| self - rhs[i])
            }
        }

        impl<const N: usize> Mul<Simd<$scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn mul(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::from_fn(|i| self * rhs[i])
            }
        }

        impl<const N: usize> Div<Simd<$scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn div(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::from_fn(|i| self / rhs[i])
            }
        }
    };
}

impl_scalar_lhs!(f32);
impl_scalar_lhs!(f64);

impl<T: Float, const N: usize> AddAssign for Simd<T, N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Float, const N: usize> SubAssign for Simd<T, N> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Float, const N: usize> MulAssign for Simd<T, N> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Float, const N: usize> DivAssign for Simd<T, N> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<T: Float, const N: usize> AddAssign<T> for Simd<T, N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Float, const N: usize> SubAssign<T> for Simd<T, N> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

impl<T: Float, const N: usize> MulAssign<T> for Simd<T, N> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Float, const N: usize> DivAssign<T> for Simd<T, N> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Float, const N: usize> Neg for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_fn(|i| -self.lanes[i])
    }
}

impl<T: Float, const N: usize> SimdCompare for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn simd_eq(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] == rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    #[inline(always)]
    fn simd_ne(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] != rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    #[inline(always)]
    fn simd_lt(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] < rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    #[inline(always)]
    fn simd_le(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] <= rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    #[inline(always)]
    fn simd_gt(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] > rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    #[inline(always)]
    fn simd_ge(self, rhs: Self) -> Self {
        Self::from_fn(|i| {
            if self.lanes[i] >= rhs.lanes[i] {
                T::one()
            } else {
                T::zero()
            }
        })
    }
}

/// Vector-scalar comparison: the scalar broadcasts to the right operand.
impl<T: Float, const N: usize> SimdCompare<T> for Simd<T, N> {
    type Output = Self;

    #[inline(always)]
    fn simd_eq(self, rhs: T) -> Self {
        self.simd_eq(Self::splat(rhs))
    }

    #[inline(always)]
    fn simd_ne(self, rhs: T) -> Self {
        self.simd_ne(Self::splat(rhs))
    }

    #[inline(always)]
    fn simd_lt(self, rhs: T) -> Self {
        self.simd_lt(Self::splat(rhs))
    }

    #[inline(always)]
    fn simd_le(self, rhs: T) -> Self {
        self.simd_le(Self::splat(rhs))
    }

    #[inline(always)]
    fn simd_gt(self, rhs: T) -> Self {
        self.simd_gt(Self::splat(rhs))
    }

    #[inline(always)]
    fn simd_ge(self, rhs: T) -> Self {
        self.simd_ge(Self::splat(rhs))
    }
}

// scalar (.) vector comparison for the concrete float types, mirroring the
// arithmetic impls
macro_rules! impl_scalar_compare_lhs {
    ($scalar:ty) => {
        impl<const N: usize> SimdCompare<Simd<$scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn simd_eq(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_eq(rhs)
            }

            #[inline(always)]
            fn simd_ne(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_ne(rhs)
            }

            #[inline(always)]
            fn simd_lt(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_lt(rhs)
            }

            #[inline(always)]
            fn simd_le(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_le(rhs)
            }

            #[inline(always)]
            fn simd_gt(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_gt(rhs)
            }

            #[inline(always)]
            fn simd_ge(self, rhs: Simd<$scalar, N>) -> Self::Output {
                Simd::splat(self).simd_ge(rhs)
            }
        }
    };
}

impl_scalar_compare_lhs!(f32);
impl_scalar_compare_lhs!(f64);

impl<T: Float, const N: usize> SimdFused for Simd<T, N> {
    /// Per-lane `self * b + c` through the scalar fused primitive, one
    /// rounding step per lane.
    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        Self::from_fn(|i| self.lanes[i].mul_add(b.lanes[i], c.lanes[i]))
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        Self::from_fn(|i| self.lanes[i].mul_add(b.lanes[i], -c.lanes[i]))
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        Self::from_fn(|i| (-self.lanes[i]).mul_add(b.lanes[i], c.lanes[i]))
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        Self::from_fn(|i| (-self.lanes[i]).mul_add(b.lanes[i], -c.lanes[i]))
    }
}

impl<T: Float, const N: usize> SimdMath for Simd<T, N> {
    #[inline(always)]
    fn neg(&self) -> Self {
        -*self
    }

    #[inline(always)]
    fn abs(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].abs())
    }

    #[inline(always)]
    fn ceil(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].ceil())
    }

    #[inline(always)]
    fn floor(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].floor())
    }

    #[inline(always)]
    fn round(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].round())
    }

    #[inline(always)]
    fn trunc(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].trunc())
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].sqrt())
    }

    /// Full-precision `1 / sqrt(x)`; the portable engine has no cheaper
    /// approximation to offer.
    #[inline(always)]
    fn rsqrt(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].sqrt().recip())
    }

    /// Full-precision `1 / x`.
    #[inline(always)]
    fn rcp(&self) -> Self {
        Self::from_fn(|i| self.lanes[i].recip())
    }
}

impl<T: Float, const N: usize> SimdSelect for Simd<T, N> {
    #[inline(always)]
    fn cond(self, pass: Self, fail: Self) -> Self {
        self * pass + (Self::splat(T::one()) - self) * fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::mem::{AlignedMode, StreamingMode, UnalignedMode};

    #[test]
    fn add_matches_scalar_per_lane() {
        let a = Simd::from_lanes([1.0f64, 2.0, 3.0, 4.0]);
        let b = Simd::from_lanes([10.0f64, 20.0, 30.0, 40.0]);

        assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
    }

    #[test]
    fn binary_ops_match_scalar_per_lane() {
        let a = Simd::from_lanes([1.5f32, -2.0, 3.25, 8.0]);
        let b = Simd::from_lanes([0.5f32, 4.0, -1.25, 2.0]);

        for i in 0..4 {
            assert_eq!((a + b)[i], a[i] + b[i]);
            assert_eq!((a - b)[i], a[i] - b[i]);
            assert_eq!((a * b)[i], a[i] * b[i]);
            assert_eq!((a / b)[i], a[i] / b[i]);
        }
    }

    #[test]
    fn scalar_operands_broadcast_on_either_side() {
        let a = Simd::from_lanes([1.0f64, 2.0, 3.0, 4.0]);

        assert_eq!((a + 1.0).to_array(), [2.0, 3.0, 4.0, 5.0]);
        assert_eq!((1.0 + a).to_array(), [2.0, 3.0, 4.0, 5.0]);
        assert_eq!((a - 1.0).to_array(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!((10.0 - a).to_array(), [9.0, 8.0, 7.0, 6.0]);
        assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((2.0 * a).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((a / 2.0).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((12.0 / a).to_array(), [12.0, 6.0, 4.0, 3.0]);
    }

    #[test]
    fn compound_assignment() {
        let mut a = Simd::from_lanes([1.0f32, 2.0, 3.0, 4.0]);
        a += Simd::splat(1.0);
        assert_eq!(a.to_array(), [2.0, 3.0, 4.0, 5.0]);

        a *= 2.0;
        assert_eq!(a.to_array(), [4.0, 6.0, 8.0, 10.0]);

        a -= 4.0;
        assert_eq!(a.to_array(), [0.0, 2.0, 4.0, 6.0]);

        a /= Simd::splat(2.0);
        assert_eq!(a.to_array(), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn generator_construction_ascending() {
        let ramp: Simd<f64, 4> = Simd::from_fn(|i| i as f64);
        assert_eq!(ramp.to_array(), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn comparison_produces_numeric_mask() {
        let xs: Simd<f64, 4> = Simd::from_fn(|i| i as f64);
        let ys = Simd::from_lanes([4.0f64, 3.0, 2.0, 1.0]);

        assert_eq!(xs.simd_eq(ys).to_array(), [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(xs.simd_ne(ys).to_array(), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(xs.simd_lt(ys).to_array(), [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(xs.simd_le(ys).to_array(), [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(xs.simd_gt(ys).to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(xs.simd_ge(ys).to_array(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn scalar_comparison_operands_broadcast_on_either_side() {
        let v = Simd::from_lanes([1.0f64, 2.0, 3.0, 4.0]);

        assert_eq!(v.simd_lt(3.0).to_array(), [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(v.simd_eq(2.0).to_array(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(v.simd_ge(2.0).to_array(), [0.0, 1.0, 1.0, 1.0]);

        // scalar on the left: lane i is (scalar cmp v[i])
        assert_eq!(3.0f64.simd_lt(v).to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(2.0f64.simd_le(v).to_array(), [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(4.0f64.simd_ne(v).to_array(), [1.0, 1.0, 1.0, 0.0]);

        assert_eq!(v.simd_gt(2.0).to_array(), 2.0f64.simd_lt(v).to_array());
    }

    #[test]
    fn nan_lanes_follow_scalar_semantics() {
        let a = Simd::from_lanes([f64::NAN, 1.0, f64::NAN, 2.0]);
        let b = Simd::from_lanes([f64::NAN, 1.0, 0.0, 3.0]);

        assert_eq!(a.simd_eq(b).to_array(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(a.simd_ne(b).to_array(), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(a.simd_lt(b).to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(a.simd_ge(b).to_array(), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn cond_selects_per_lane() {
        let mask = Simd::from_lanes([1.0f32, 0.0, 1.0, 0.0]);
        let pass = Simd::splat(5.0f32);
        let fail = Simd::splat(-5.0f32);

        assert_eq!(mask.cond(pass, fail).to_array(), [5.0, -5.0, 5.0, -5.0]);
    }

    #[test]
    fn fma_is_single_rounded() {
        // (1 + eps)(1 - eps) - 1 = -eps^2; a separate multiply rounds the
        // product to 1.0 and the difference collapses to zero.
        let a: Simd<f64, 4> = Simd::splat(1.0 + f64::EPSILON);
        let b = Simd::splat(1.0 - f64::EPSILON);
        let c = Simd::splat(-1.0);

        let fused = a.fma(b, c)[0];
        let two_step = (a[0] * b[0]) + c[0];

        assert_eq!(fused, a[0].mul_add(b[0], c[0]));
        assert_ne!(fused, two_step);
    }

    #[test]
    fn fused_variants_sign_conventions() {
        let a: Simd<f64, 4> = Simd::splat(2.0);
        let b = Simd::splat(3.0);
        let c = Simd::splat(5.0);

        assert_eq!(a.fma(b, c)[0], 11.0);
        assert_eq!(a.fms(b, c)[0], 1.0);
        assert_eq!(a.fnma(b, c)[0], -1.0);
        assert_eq!(a.fnms(b, c)[0], -11.0);
    }

    #[test]
    fn unary_math_matches_scalar() {
        let v = Simd::from_lanes([-3.5f64, -0.5, 2.25, 9.0]);

        assert_eq!(v.abs().to_array(), [3.5, 0.5, 2.25, 9.0]);
        assert_eq!(SimdMath::neg(&v).to_array(), [3.5, 0.5, -2.25, -9.0]);
        assert_eq!(v.ceil().to_array(), [-3.0, 0.0, 3.0, 9.0]);
        assert_eq!(v.floor().to_array(), [-4.0, -1.0, 2.0, 9.0]);
        assert_eq!(v.trunc().to_array(), [-3.0, 0.0, 2.0, 9.0]);

        let s = Simd::from_lanes([4.0f64, 9.0, 16.0, 25.0]);
        assert_eq!(s.sqrt().to_array(), [2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.rcp().to_array(), [0.25, 1.0 / 9.0, 0.0625, 0.04]);
        assert_eq!(s.rsqrt().to_array(), [0.5, 1.0 / 3.0, 0.25, 0.2]);
    }

    #[test]
    fn load_store_roundtrip_all_modes() {
        let src = [1.0f64, 2.0, 3.0, 4.0];
        let mut dst = [0.0f64; 4];

        let v: Simd<f64, 4> = unsafe { Simd::load_with::<AlignedMode>(src.as_ptr()) };
        unsafe { v.store_with::<AlignedMode>(dst.as_mut_ptr()) };
        assert_eq!(dst, src);

        dst = [0.0; 4];
        let v: Simd<f64, 4> = unsafe { Simd::load_with::<UnalignedMode>(src.as_ptr()) };
        unsafe { v.store_with::<UnalignedMode>(dst.as_mut_ptr()) };
        assert_eq!(dst, src);

        dst = [0.0; 4];
        let v: Simd<f64, 4> = unsafe { Simd::load_with::<StreamingMode>(src.as_ptr()) };
        unsafe { v.store_with::<StreamingMode>(dst.as_mut_ptr()) };
        assert_eq!(dst, src);
    }

    #[test]
    fn lane_indexing_reads_and_writes() {
        let mut v = Simd::from_lanes([1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(v[2], 3.0);

        v[2] = 30.0;
        assert_eq!(v.to_array(), [1.0, 2.0, 30.0, 4.0]);
    }

    #[test]
    #[should_panic]
    fn lane_indexing_out_of_range_panics() {
        let v = Simd::from_lanes([1.0f32, 2.0]);
        let _ = v[2];
    }
}
