//! Write-through view over externally owned storage.
//!
//! [`View`] lets `N` contiguous elements of a caller-owned buffer participate
//! in vector expressions without an explicit load/store pair at the call
//! site: reading a view materializes a [`Simd`] value, compound assignment
//! writes every lane straight back through the pointer.

use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num::Float;

use crate::simd::unrolled::Simd;

/// A non-owning handle over `N` contiguous elements of `T`.
///
/// The view never allocates and never outlives the borrow it was created
/// from. Arithmetic on a view materializes a [`Simd`] value; only the
/// compound-assignment operators and [`View::assign`]/[`View::fill`] mutate
/// the backing storage, lane-by-lane in ascending order with no staging
/// buffer.
///
/// # Examples
///
/// ```rust
/// use lanewise::simd::unrolled::{Simd, View};
///
/// let mut buffer = [1.0f64, 2.0, 3.0, 4.0];
/// let mut view: View<f64, 4> = View::from_slice(&mut buffer);
///
/// view += Simd::splat(10.0);
/// assert_eq!(buffer, [11.0, 12.0, 13.0, 14.0]);
/// ```
pub struct View<'a, T, const N: usize> {
    ptr: *mut T,
    _backing: PhantomData<&'a mut [T]>,
}

impl<'a, T: Float, const N: usize> View<'a, T, N> {
    /// Number of lanes the view covers.
    pub const LANES: usize = N;

    /// Builds a view over the first `N` elements of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < N`.
    #[inline(always)]
    pub fn from_slice(slice: &'a mut [T]) -> Self {
        assert!(
            slice.len() >= N,
            "slice of {} elements cannot back a {N}-lane view",
            slice.len()
        );

        Self {
            ptr: slice.as_mut_ptr(),
            _backing: PhantomData,
        }
    }

    /// Builds a view directly over a raw pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and reference at least `N` contiguous writable
    /// elements that stay valid for `'a`. Using the view after the backing
    /// storage is freed or resized is undefined behavior.
    #[inline(always)]
    pub unsafe fn from_ptr(ptr: *mut T) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            ptr,
            _backing: PhantomData,
        }
    }

    /// Materializes the viewed lanes into an independent vector.
    #[inline(always)]
    pub fn to_vector(&self) -> Simd<T, N> {
        Simd::from_fn(|i| unsafe { self.ptr.add(i).read() })
    }

    /// Writes every lane of `value` through the pointer.
    #[inline(always)]
    pub fn assign(&mut self, value: Simd<T, N>) {
        for i in 0..N {
            unsafe { self.ptr.add(i).write(value[i]) };
        }
    }

    /// Broadcasts `value` into every viewed element.
    #[inline(always)]
    pub fn fill(&mut self, value: T) {
        for i in 0..N {
            unsafe { self.ptr.add(i).write(value) };
        }
    }
}

impl<'a, T: Float, const N: usize> From<&View<'a, T, N>> for Simd<T, N> {
    #[inline(always)]
    fn from(view: &View<'a, T, N>) -> Self {
        view.to_vector()
    }
}

// Binary operators materialize every view operand first, so view-involving
// expressions have identical lane semantics to plain vector expressions.
macro_rules! impl_view_binary {
    ($op:ident, $method:ident) => {
        impl<'a, 'b, T: Float, const N: usize> $op<&'b View<'b, T, N>> for &'a View<'a, T, N> {
            type Output = Simd<T, N>;

            #[inline(always)]
            fn $method(self, rhs: &'b View<'b, T, N>) -> Simd<T, N> {
                self.to_vector().$method(rhs.to_vector())
            }
        }

        impl<'a, T: Float, const N: usize> $op<Simd<T, N>> for &'a View<'a, T, N> {
            type Output = Simd<T, N>;

            #[inline(always)]
            fn $method(self, rhs: Simd<T, N>) -> Simd<T, N> {
                self.to_vector().$method(rhs)
            }
        }

        impl<'a, T: Float, const N: usize> $op<&'a View<'a, T, N>> for Simd<T, N> {
            type Output = Simd<T, N>;

            #[inline(always)]
            fn $method(self, rhs: &'a View<'a, T, N>) -> Simd<T, N> {
                self.$method(rhs.to_vector())
            }
        }

        impl<'a, T: Float, const N: usize> $op<T> for &'a View<'a, T, N> {
            type Output = Simd<T, N>;

            #[inline(always)]
            fn $method(self, rhs: T) -> Simd<T, N> {
                self.to_vector().$method(rhs)
            }
        }
    };
}

impl_view_binary!(Add, add);
impl_view_binary!(Sub, sub);
impl_view_binary!(Mul, mul);
impl_view_binary!(Div, div);

// scalar (.) view for the concrete float types, mirroring the vector impls
macro_rules! impl_view_scalar_lhs {
    ($scalar:ty) => {
        impl<'a, const N: usize> Add<&'a View<'a, $scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn add(self, rhs: &'a View<'a, $scalar, N>) -> Self::Output {
                self + rhs.to_vector()
            }
        }

        impl<'a, const N: usize> Sub<&'a View<'a, $scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn sub(self, rhs: &'a View<'a, $scalar, N>) -> Self::Output {
                self - rhs.to_vector()
            }
        }

        impl<'a, const N: usize> Mul<&'a View<'a, $scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn mul(self, rhs: &'a View<'a, $scalar, N>) -> Self::Output {
                self * rhs.to_vector()
            }
        }

        impl<'a, const N: usize> Div<&'a View<'a, $scalar, N>> for $scalar {
            type Output = Simd<$scalar, N>;

            #[inline(always)]
            fn div(self, rhs: &'a View<'a, $scalar, N>) -> Self::Output {
                self / rhs.to_vector()
            }
        }
    };
}

impl_view_scalar_lhs!(f32);
impl_view_scalar_lhs!(f64);

// Compound assignment writes through; each lane write is immediately visible
// through the pointer.
macro_rules! impl_view_assign {
    ($op:ident, $method:ident, $binop:tt) => {
        impl<'a, T: Float, const N: usize> $op<Simd<T, N>> for View<'a, T, N> {
            #[inline(always)]
            fn $method(&mut self, rhs: Simd<T, N>) {
                for i in 0..N {
                    unsafe {
                        let lane = self.ptr.add(i);
                        lane.write(lane.read() $binop rhs[i]);
                    }
                }
            }
        }

        impl<'a, T: Float, const N: usize> $op<T> for View<'a, T, N> {
            #[inline(always)]
            fn $method(&mut self, rhs: T) {
                for i in 0..N {
                    unsafe {
                        let lane = self.ptr.add(i);
                        lane.write(lane.read() $binop rhs);
                    }
                }
            }
        }
    };
}

impl_view_assign!(AddAssign, add_assign, +);
impl_view_assign!(SubAssign, sub_assign, -);
impl_view_assign!(MulAssign, mul_assign, *);
impl_view_assign!(DivAssign, div_assign, /);
