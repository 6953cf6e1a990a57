//! AVX-512 16-lane f32 vector backed by one `__m512` register.

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
pub const AVX512_ALIGNMENT: usize = 64;

/// Number of f32 lanes in a 512-bit register.
pub const LANE_COUNT: usize = 16;

/// 16 packed f32 values in one AVX-512 register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x16 {
    elements: __m512,
}

impl F32x16 {
    /// Broadcasts `value` into all 16 lanes.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm512_set1_ps(value) },
        }
    }

    /// Builds a vector from an explicit per-lane list.
    #[inline(always)]
    pub fn from_lanes(lanes: [f32; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm512_loadu_ps(lanes.as_ptr()) },
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
        unsafe { _mm512_storeu_ps(out.as_mut_ptr(), self.elements) };
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

    /// Expands a `__mmask16` bitmask to the numeric {1.0, 0.0} convention.
    /// Blend picks from the second operand where the mask bit is set, so ones
    /// must ride in that slot.
    #[inline(always)]
    fn mask_to_numeric(mask: __mmask16) -> Self {
        Self {
            elements: unsafe {
                _mm512_mask_blend_ps(mask, _mm512_setzero_ps(), _mm512_set1_ps(1.0))
            },
        }
    }
}

impl Alignment<f32> for F32x16 {
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        ptr as usize % AVX512_ALIGNMENT == 0
    }
}

impl SimdLoad<f32> for F32x16 {
    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self::splat(value)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 64-byte aligned");

        Self {
            elements: _mm512_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm512_loadu_ps(ptr),
        }
    }

    /// Serviced by the aligned load; the streaming contract allows the
    /// implementation to go through the cache.
    #[inline(always)]
    unsafe fn load_stream(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 64-byte aligned");

        Self {
            elements: _mm512_load_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x16 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 64-byte aligned");

        _mm512_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm512_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn stream_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 64-byte aligned");

        _mm512_stream_ps(ptr, self.elements)
    }
}

/// Immutable lane access. Panics outside `[0, 16)`.
impl Index<usize> for F32x16 {
    type Output = f32;

    #[inline(always)]
    fn index(&self, index: usize) -> &f32 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &*(std::ptr::addr_of!(self.elements) as *const f32).add(index) }
    }
}

/// Mutable lane access. Panics outside `[0, 16)`.
impl IndexMut<usize> for F32x16 {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        assert!(index < LANE_COUNT, "lane index {index} out of range");
        unsafe { &mut *(std::ptr::addr_of_mut!(self.elements) as *mut f32).add(index) }
    }
}

impl Add for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm512_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm512_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm512_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm512_div_ps(self.elements, rhs.elements) },
        }
    }
}

// vector (.) scalar and scalar (.) vector broadcast forms
macro_rules! impl_scalar_ops {
    ($($op:ident :: $method:ident),+) => {
        $(
            impl $op<f32> for F32x16 {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: f32) -> Self {
                    self.$method(Self::splat(rhs))
                }
            }

            impl $op<F32x16> for f32 {
                type Output = F32x16;

                #[inline(always)]
                fn $method(self, rhs: F32x16) -> F32x16 {
                    F32x16::splat(self).$method(rhs)
                }
            }
        )+
    };
}

impl_scalar_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

macro_rules! impl_compound_assign {
    ($($op:ident :: $method:ident => $binop:tt),+) => {
        $(
            impl $op for F32x16 {
                #[inline(always)]
                fn $method(&mut self, rhs: Self) {
                    *self = *self $binop rhs;
                }
            }

            impl $op<f32> for F32x16 {
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

impl Neg for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            elements: unsafe { _mm512_xor_ps(self.elements, _mm512_set1_ps(-0.0)) },
        }
    }
}

impl SimdCompare for F32x16 {
    type Output = Self;

    /// Lanewise `==` with the ordered-quiet predicate: NaN lanes are 0.0.
    #[inline(always)]
    fn simd_eq(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_EQ_OQ>(self.elements, rhs.elements)
        })
    }

    /// Lanewise `!=` with the unordered-quiet predicate: NaN lanes are 1.0,
    /// matching scalar `!=`.
    #[inline(always)]
    fn simd_ne(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_NEQ_UQ>(self.elements, rhs.elements)
        })
    }

    #[inline(always)]
    fn simd_lt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_LT_OQ>(self.elements, rhs.elements)
        })
    }

    #[inline(always)]
    fn simd_le(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_LE_OQ>(self.elements, rhs.elements)
        })
    }

    #[inline(always)]
    fn simd_gt(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_GT_OQ>(self.elements, rhs.elements)
        })
    }

    #[inline(always)]
    fn simd_ge(self, rhs: Self) -> Self {
        Self::mask_to_numeric(unsafe {
            _mm512_cmp_ps_mask::<_CMP_GE_OQ>(self.elements, rhs.elements)
        })
    }
}

// vector (.) scalar and scalar (.) vector comparison broadcast forms
macro_rules! impl_scalar_compare {
    ($($method:ident),+) => {
        impl SimdCompare<f32> for F32x16 {
            type Output = Self;

            $(
                #[inline(always)]
                fn $method(self, rhs: f32) -> Self {
                    self.$method(Self::splat(rhs))
                }
            )+
        }

        impl SimdCompare<F32x16> for f32 {
            type Output = F32x16;

            $(
                #[inline(always)]
                fn $method(self, rhs: F32x16) -> F32x16 {
                    F32x16::splat(self).$method(rhs)
                }
            )+
        }
    };
}

impl_scalar_compare!(simd_eq, simd_ne, simd_lt, simd_le, simd_gt, simd_ge);

impl SimdFused for F32x16 {
    /// `self * b + c` in one rounding step via `_mm512_fmadd_ps`.
    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm512_fmadd_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm512_fmsub_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnma(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm512_fnmadd_ps(self.elements, b.elements, c.elements) },
        }
    }

    #[inline(always)]
    fn fnms(self, b: Self, c: Self) -> Self {
        Self {
            elements: unsafe { _mm512_fnmsub_ps(self.elements, b.elements, c.elements) },
        }
    }
}

impl SimdMath for F32x16 {
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
            elements: unsafe { _mm512_roundscale_ps::<{ _MM_FROUND_TO_POS_INF }>(self.elements) },
        }
    }

    #[inline(always)]
    fn floor(&self) -> Self {
        Self {
            elements: unsafe { _mm512_roundscale_ps::<{ _MM_FROUND_TO_NEG_INF }>(self.elements) },
        }
    }

    /// Rounds to nearest, ties to even (the register's rounding mode).
    #[inline(always)]
    fn round(&self) -> Self {
        Self {
            elements: unsafe {
                _mm512_roundscale_ps::<{ _MM_FROUND_TO_NEAREST_INT }>(self.elements)
            },
        }
    }

    #[inline(always)]
    fn trunc(&self) -> Self {
        Self {
            elements: unsafe { _mm512_roundscale_ps::<{ _MM_FROUND_TO_ZERO }>(self.elements) },
        }
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        Self {
            elements: unsafe { _mm512_sqrt_ps(self.elements) },
        }
    }

    /// Approximate `1 / sqrt(x)`, relative error at most 2^-14.
    #[inline(always)]
    fn rsqrt(&self) -> Self {
        Self {
            elements: unsafe { _mm512_rsqrt14_ps(self.elements) },
        }
    }

    /// Approximate `1 / x`, relative error at most 2^-14.
    #[inline(always)]
    fn rcp(&self) -> Self {
        Self {
            elements: unsafe { _mm512_rcp14_ps(self.elements) },
        }
    }
}

impl SimdSelect for F32x16 {
    #[inline(always)]
    fn cond(self, pass: Self, fail: Self) -> Self {
        self * pass + (Self::splat(1.0) - self) * fail
    }
}
