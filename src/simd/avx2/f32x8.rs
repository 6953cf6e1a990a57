//! AVX 8-lane f32 vector backed by one `__m256` register.
//!
//! # Architecture requirements
//!
//! - **CPU support**: AVX2-capable processors (Haswell and later); the fused
//!   operations additionally use FMA, enabled together with AVX2 by the build
//!   script.
//! - **Compilation**: this module is compiled only when the build script
//!   emits `cfg(avx2)` and the matching `-C target-feature` flags.
//!
//! # Memory alignment
//!
//! The aligned and streaming access modes require 32-byte alignment; a
//! misaligned pointer is undefined behavior and typically faults. The
//! unaligned mode works with any pointer at a small cost on some hardware.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::simd::mem::AccessMode;
use crate::simd::traits::{
    Alignment, SimdCompare, SimdFused, SimdLoad, SimdMath, SimdSelect, SimdStore,
};

/// Alignment in bytes required by the aligned and streaming access modes.
pub const AVX_ALIGNMENT: usize = 32;

/// Number of f32 lanes in a 256-bit register.
pub const LANE_COUNT: usize = 8;

/// 8 packed f32 values in one AVX register.
///
/// # Examples
///
/// ```rust
/// # #[cfg(avx2)]
/// # {
/// use lanewise::simd::avx2::F32x8;
/// use lanewise::simd::{SimdCompare, SimdSelect};
///
/// let a = F32x8::from_lanes([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// let b = F32x8::splat(4.0);
///
/// // mask lanes are exactly 1.0 / 0.0, directly usable in arithmetic
/// let clamped = a.simd_gt(b).cond(b, a);
/// assert_eq!(clamped.to_array(), [1.0, 2.0, 3.0, 4.0, 4.0, 4.0, 4.0, 4.0]);
/// # }
/// ```
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x8 {
    elements: __m256,
}

impl F32x8 {
    /// Broadcasts `value` into all 8 lanes.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
        }
    }

    /// Builds a vector from an explicit per-lane list.
    #[inline(always)]
    pub fn from_lanes(lanes: [f32; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm256_loadu_ps(lanes.as_ptr()) },
        }
    }

    /// Builds a vector by evaluating `f` for every lane index in ascending
    /// order.
    #[inline(always)]
    pub fn from_fn<F: FnMut(usize) -> f32>(f: F) -> Self {
        Self::from_lanes(core::array::from_fn(f))
    }

    /// Copies the lanes out as a plain array.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.elements) };
        out
    }

    /// Loads a vector from `ptr` under the access mode chosen by `M`.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdLoad`] method applies.
    #[inline(always)]
    pub unsafe fn load_with<M: AccessMode>(ptr: *const f32) -> Self {
        M::load(ptr)
    }

    /// Stores the vector to `ptr` under the access mode chosen by `M`.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdStore`] method applies.
    #[inline(always)]
    pub unsafe fn store_with<M: AccessMode>(&self, ptr: *mut f32) {
        M::store(self, ptr)
    }

    /// Normalizes a hardware comparison mask (all-ones / all-zeros lanes) to
    /// the numeric {1.0, 0.0} convention by clearing every bit of the
    /// all-ones pattern except those of 1.0f32. An unordered (NaN) outcome is
    /// all-zeros and stays 0.0.
    #[inline(always)]
    fn mask_to_numeric(mask: __m256) -> Self {
        Self {
            elements: unsafe { _mm256_and_ps(mask, _mm256_set1_ps(1.0)) },
        }
    }
}

impl Alignment<f32> for F32x8 {
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        ptr as usize % AVX_ALIGNMENT == 0
    }
}

impl SimdLoad<f32> for F32x8 {
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Serviced by the aligned load; the streaming contract allows the
    /// implementation to go through the cache.
    #[inline(always)]
    unsafe fn load_stream(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self {
            elements: _mm256_load_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        _mm256_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn stream_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        _mm256_stream_ps(ptr, self.elements)
    }
}

/// Immutable lane access through the register's in-memory representation.
/// Panics outside `[0, 8)`.
impl Index<usize> for F32x8 {
    type Output = f32;

    #[inline(always)]
    fn index(&self, index: usize) -> &f32 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &*(std::ptr::addr_of!(self.elements) as *const f32).add(index) }
    }
}

/// Mutable lane access. Panics outside `[0, 8)`.
impl IndexMut<usize> for F32x8 {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &mut *(std::ptr::addr_of_mut!(self.elements) as *mut f32).add(index) }
    }
}

impl Add for F32x8 {
    type Output = Self;

    /// Lanewise addition via `_mm256_add_ps`.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    /// Lanewise subtraction via `_mm256_sub_ps`.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    /// Lanewise multiplication via `_mm256_mul_ps`.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    /// Lanewise division via `_mm256_div_ps`.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}

// vector (.) scalar and scalar (.) vector broadcast forms
macro_rules! impl_scalar_ops {
    ($($op:ident :: $method:ident),+) => {
        $(
            impl $op<f32> for F32x8 {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: f32) -> Self {
                    self.$method(Self::splat(rhs))
                }
            }

            impl $op<F32x8> for f32 {
                type Output = F32x8;

                #[inline(always)]
                fn $method(self, rhs: F32x8) -> F32x8 {
                    F32x8::splat(self).$method(rhs)
                }
            }
        )+
    };
}

impl_scalar_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

macro_rules! impl_compound_assign {
    ($($op:ident :: $method:ident => $binop:tt),+) => {
        $(
            impl $op for F32x8 {
                #[inline(always)]
                fn $method(&mut self, rhs: Self) {
                    *self = *self $binop rhs;
                }
            }

            impl $op<f32> for F32x8 {
                #[inline(always)]
                fn $method(&mut self, rhs: f32) {
                    *self = *self $binop rhs;
                }
            }
        )+
    };
}

impl_compound_assign!(
    AddAssign::add_assign => +,
    SubAssign::sub_assign => -,
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /
);

impl Neg for F32x8 {
    type Output = Self;

    /// Lanewise sign flip.
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            elements: unsafe { _mm256_xor_ps(self.elements, _mm256_set1_ps(-0.0)) },
        }
    }
}

impl SimdCompare for F32x8 {
    type Output = Self;

    /// Lanewise `==` with the ordered-quiet predicate: NaN lanes are 0.0.
    #[inline(always)]
    fn simd_eq(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_EQ_OQ>(self.elements, rhs.elements) })
    }

    /// Lanewise `!=` with the unordered-quiet predicate: NaN lanes are 1.0,
    /// matching scalar `!=`.
    #[inline(always)]
    fn simd_ne(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_NEQ_UQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_lt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_LT_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_le(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_LE_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_gt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_GT_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_ge(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_ps::<_CMP_GE_OQ>(self.elements, rhs.elements) })
    }
}

// vector (.) scalar and scalar (.) vector comparison broadcast forms
macro_rules! impl_scalar_compare {
    ($($method:ident),+) => {
        impl SimdCompare<f32> for F32x8 {
            type Output = Self;

            $(
                #[inline(always)]
                fn $method(self, rhs: f32) -> Self {
                    self.$method(Self::splat(rhs))
                }
            )+
        }

        impl SimdCompare<F32x8> for f32 {
            type Output = F32x8;

            $(
                #[inline(always)]
                fn $method(self, rhs: F32x8) -> F32x8 {
                    F32x8::splat(self).$method(rhs)
                }
            )+
        }
    };
}

impl_scalar_compare!(simd_eq, simd_ne, simd_lt, simd_le, simd_gt, simd_ge);

impl SimdFused for F32x8 {
    /// `self * b + c` in one rounding step via `_mm256_fmadd_ps`.
    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fmadd_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fmsub_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fnmadd_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fnmsub_ps(self.elements, b.elements, c.elements) },
        }
    }
}

impl SimdMath for F32x8 {
    #[inline(always)]
    fn neg(&self) -> Self {
        -*self
    }

    /// Derived as `cond(self < 0, -self, self)` so it exercises the same
    /// numeric-mask select every backend must get right.
    #[inline(always)]
    fn abs(&self) -> Self {
        self.simd_lt(Self::splat(0.0)).cond(-*self, *self)
    }

    #[inline(always)]
    fn ceil(&self) -> Self {
        Self {
            elements: unsafe { _mm256_ceil_ps(self.elements) },
        }
    }

    #[inline(always)]
    fn floor(&self) -> Self {
        Self {
            elements: unsafe { _mm256_floor_ps(self.elements) },
        }
    }

    /// Rounds to nearest, ties to even (the register's rounding mode).
    #[inline(always)]
    fn round(&self) -> Self {
        Self {
            elements: unsafe {
                _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.elements)
            },
        }
    }

    #[inline(always)]
    fn trunc(&self) -> Self {
        Self {
            elements: unsafe {
                _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.elements)
            },
        }
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        Self {
            elements: unsafe { _mm256_sqrt_ps(self.elements) },
        }
    }

    /// Approximate `1 / sqrt(x)`; relative error at most `1.5 * 2^-12`.
    #[inline(always)]
    fn rsqrt(&self) -> Self {
        Self {
            elements: unsafe { _mm256_rsqrt_ps(self.elements) },
        }
    }

    /// Approximate `1 / x`; relative error at most `1.5 * 2^-12`.
    #[inline(always)]
    fn rcp(&self) -> Self {
        Self {
            elements: unsafe { _mm256_rcp_ps(self.elements) },
        }
    }
}

impl SimdSelect for F32x8 {
    #[inline(always)]
    fn cond(self, pass: Self, fail: Self) -> Self {
        self * pass + (Self::splat(1.0) - self) * fail
    }
}
