//! AVX 4-lane f64 vector backed by one `__m256d` register.
//!
//! Same contract and alignment requirements as [`crate::simd::avx2::f32x8`],
//! at double precision. The instruction set has no approximate reciprocal
//! family for f64, so `rcp` and `rsqrt` here are computed at full precision,
//! a conforming refinement of the documented bound.

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

/// Number of f64 lanes in a 256-bit register.
pub const LANE_COUNT: usize = 4;

/// 4 packed f64 values in one AVX register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F64x4 {
    elements: __m256d,
}

impl F64x4 {
    /// Broadcasts `value` into all 4 lanes.
    #[inline(always)]
    pub fn splat(value: f64) -> Self {
        Self {
            elements: unsafe { _mm256_set1_pd(value) },
        }
    }

    /// Builds a vector from an explicit per-lane list.
    #[inline(always)]
    pub fn from_lanes(lanes: [f64; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm256_loadu_pd(lanes.as_ptr()) },
        }
    }

    /// Builds a vector by evaluating `f` for every lane index in ascending
    /// order.
    #[inline(always)]
    pub fn from_fn<F: FnMut(usize) -> f64>(f: F) -> Self {
        Self::from_lanes(core::array::from_fn(f))
    }

    /// Copies the lanes out as a plain array.
    #[inline(always)]
    pub fn to_array(self) -> [f64; LANE_COUNT] {
        let mut out = [0.0f64; LANE_COUNT];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.elements) };
        out
    }

    /// Loads a vector from `ptr` under the access mode chosen by `M`.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdLoad`] method applies.
    #[inline(always)]
    pub unsafe fn load_with<M: AccessMode>(ptr: *const f64) -> Self {
        M::load(ptr)
    }

    /// Stores the vector to `ptr` under the access mode chosen by `M`.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdStore`] method applies.
    #[inline(always)]
    pub unsafe fn store_with<M: AccessMode>(&self, ptr: *mut f64) {
        M::store(self, ptr)
    }

    /// Normalizes a hardware comparison mask to the numeric {1.0, 0.0}
    /// convention. AND against the 1.0 bit pattern is the one normalization
    /// that is correct for every predicate outcome, unordered included; an
    /// XOR-based variant is not, because the all-ones pattern XOR 1.0 is not
    /// a numeric one.
    #[inline(always)]
    fn mask_to_numeric(mask: __m256d) -> Self {
        Self {
            elements: unsafe { _mm256_and_pd(mask, _mm256_set1_pd(1.0)) },
        }
    }
}

impl Alignment<f64> for F64x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        ptr as usize % AVX_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x4 {
    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self {
            elements: _mm256_load_pd(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_pd(ptr),
        }
    }

    /// Serviced by the aligned load; the streaming contract allows the
    /// implementation to go through the cache.
    #[inline(always)]
    unsafe fn load_stream(ptr: *const f64) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self {
            elements: _mm256_load_pd(ptr),
        }
    }
}

impl SimdStore<f64> for F64x4 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        _mm256_store_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn stream_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        _mm256_stream_pd(ptr, self.elements)
    }
}

/// Immutable lane access. Panics outside `[0, 4)`.
impl Index<usize> for F64x4 {
    type Output = f64;

    #[inline(always)]
    fn index(&self, index: usize) -> &f64 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &*(std::ptr::addr_of!(self.elements) as *const f64).add(index) }
    }
}

/// Mutable lane access. Panics outside `[0, 4)`.
impl IndexMut<usize> for F64x4 {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &mut *(std::ptr::addr_of_mut!(self.elements) as *mut f64).add(index) }
    }
}

impl Add for F64x4 {
    type Output = Self;

    /// Lanewise addition via `_mm256_add_pd`.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F64x4 {
    type Output = Self;

    /// Lanewise subtraction via `_mm256_sub_pd`.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_sub_pd(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x4 {
    type Output = Self;

    /// Lanewise multiplication via `_mm256_mul_pd`.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_mul_pd(self.elements, rhs.elements) },
        }
    }
}

impl Div for F64x4 {
    type Output = Self;

    /// Lanewise division via `_mm256_div_pd`.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_div_pd(self.elements, rhs.elements) },
        }
    }
}

// vector (.) scalar and scalar (.) vector broadcast forms
macro_rules! impl_scalar_ops {
    ($($op:ident :: $method:ident),+) => {
        $(
            impl $op<f64> for F64x4 {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: f64) -> Self {
                    self.$method(Self::splat(rhs))
                }
            }

            impl $op<F64x4> for f64 {
                type Output = F64x4;

                #[inline(always)]
                fn $method(self, rhs: F64x4) -> F64x4 {
                    F64x4::splat(self).$method(rhs)
                }
            }
        )+
    };
}

impl_scalar_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

macro_rules! impl_compound_assign {
    ($($op:ident :: $method:ident => $binop:tt),+) => {
        $(
            impl $op for F64x4 {
                #[inline(always)]
                fn $method(&mut self, rhs: Self) {
                    *self = *self $binop rhs;
                }
            }

            impl $op<f64> for F64x4 {
                #[inline(always)]
                fn $method(&mut self, rhs: f64) {
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

impl Neg for F64x4 {
    type Output = Self;

    /// Lanewise sign flip.
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            elements: unsafe { _mm256_xor_pd(self.elements, _mm256_set1_pd(-0.0)) },
        }
    }
}

impl SimdCompare for F64x4 {
    type Output = Self;

    /// Lanewise `==` with the ordered-quiet predicate: NaN lanes are 0.0.
    #[inline(always)]
    fn simd_eq(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_EQ_OQ>(self.elements, rhs.elements) })
    }

    /// Lanewise `!=` with the unordered-quiet predicate: NaN lanes are 1.0,
    /// matching scalar `!=`.
    #[inline(always)]
    fn simd_ne(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_NEQ_UQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_lt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_LT_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_le(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_LE_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_gt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_GT_OQ>(self.elements, rhs.elements) })
    }

    #[inline(always)]
    fn simd_ge(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe { _mm256_cmp_pd::<_CMP_GE_OQ>(self.elements, rhs.elements) })
    }
}

// vector (.) scalar and scalar (.) vector comparison broadcast forms
macro_rules! impl_scalar_compare {
    ($($method:ident),+) => {
        impl SimdCompare<f64> for F64x4 {
            type Output = Self;

            $(
                #[inline(always)]
                fn $method(self, rhs: f64) -> Self {
                    self.$method(Self::splat(rhs))
                }
            )+
        }

        impl SimdCompare<F64x4> for f64 {
            type Output = F64x4;

            $(
                #[inline(always)]
                fn $method(self, rhs: F64x4) -> F64x4 {
                    F64x4::splat(self).$method(rhs)
                }
            )+
        }
    };
}

impl_scalar_compare!(simd_eq, simd_ne, simd_lt, simd_le, simd_gt, simd_ge);

impl SimdFused for F64x4 {
    /// `self * b + c` in one rounding step via `_mm256_fmadd_pd`.
    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fmadd_pd(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fmsub_pd(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fnmadd_pd(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fnmsub_pd(self.elements, b.elements, c.elements) },
        }
    }
}

impl SimdMath for F64x4 {
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
            elements: unsafe { _mm256_ceil_pd(self.elements) },
        }
    }

    #[inline(always)]
    fn floor(&self) -> Self {
        Self {
            elements: unsafe { _mm256_floor_pd(self.elements) },
        }
    }

    /// Rounds to nearest, ties to even (the register's rounding mode).
    #[inline(always)]
    fn round(&self) -> Self {
        Self {
            elements: unsafe {
                _mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.elements)
            },
        }
    }

    #[inline(always)]
    fn trunc(&self) -> Self {
        Self {
            elements: unsafe {
                _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(self.elements)
            },
        }
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        Self {
            elements: unsafe { _mm256_sqrt_pd(self.elements) },
        }
    }

    /// Full-precision `1 / sqrt(x)`; no approximate f64 instruction exists at
    /// this width.
    #[inline(always)]
    fn rsqrt(&self) -> Self {
        Self::splat(1.0) / self.sqrt()
    }

    /// Full-precision `1 / x`.
    #[inline(always)]
    fn rcp(&self) -> Self {
        Self::splat(1.0) / *self
    }
}

impl SimdSelect for F64x4 {
    #[inline(always)]
    fn cond(self, pass: Self, fail: Self) -> Self {
        self * pass + (Self::splat(1.0) - self) * fail
    }
}
