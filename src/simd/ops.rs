//! Free-function spellings of the trait surface.
//!
//! Numeric kernels often read better as `fma(a, b, c)` and `abs(x)` than as
//! method chains; these wrappers forward to the traits and work with every
//! backend.

use crate::simd::traits::{SimdFused, SimdMath, SimdSelect};

/// Lanewise negation.
#[inline(always)]
pub fn neg<V: SimdMath>(a: &V) -> V {
    a.neg()
}

/// Lanewise absolute value.
#[inline(always)]
pub fn abs<V: SimdMath>(a: &V) -> V {
    a.abs()
}

/// Lanewise rounding toward positive infinity.
#[inline(always)]
pub fn ceil<V: SimdMath>(a: &V) -> V {
    a.ceil()
}

/// Lanewise rounding toward negative infinity.
#[inline(always)]
pub fn floor<V: SimdMath>(a: &V) -> V {
    a.floor()
}

/// Lanewise rounding to the nearest integer.
#[inline(always)]
pub fn round<V: SimdMath>(a: &V) -> V {
    a.round()
}

/// Lanewise rounding toward zero.
#[inline(always)]
pub fn trunc<V: SimdMath>(a: &V) -> V {
    a.trunc()
}

/// Lanewise square root.
#[inline(always)]
pub fn sqrt<V: SimdMath>(a: &V) -> V {
    a.sqrt()
}

/// Lanewise reciprocal square root, possibly approximate.
#[inline(always)]
pub fn rsqrt<V: SimdMath>(a: &V) -> V {
    a.rsqrt()
}

/// Lanewise reciprocal, possibly approximate.
#[inline(always)]
pub fn rcp<V: SimdMath>(a: &V) -> V {
    a.rcp()
}

/// `a * b + c` per lane, single rounding where supported.
#[inline(always)]
pub fn fma<V: SimdFused>(a: V, b: V, c: V) -> V {
    a.fma(b, c)
}

/// `a * b - c` per lane, single rounding where supported.
#[inline(always)]
pub fn fms<V: SimdFused>(a: V, b: V, c: V) -> V {
    a.fms(b, c)
}

/// `-(a * b) + c` per lane, single rounding where supported.
#[inline(always)]
pub fn fnma<V: SimdFused>(a: V, b: V, c: V) -> V {
    a.fnma(b, c)
}

/// `-(a * b) - c` per lane, single rounding where supported.
#[inline(always)]
pub fn fnms<V: SimdFused>(a: V, b: V, c: V) -> V {
    a.fnms(b, c)
}

/// Selects `pass` where `test` is one and `fail` where `test` is zero.
///
/// `test` must hold the {0, 1} lanes produced by
/// [`crate::simd::traits::SimdCompare`].
#[inline(always)]
pub fn cond<V: SimdSelect>(test: V, pass: V, fail: V) -> V {
    test.cond(pass, fail)
}
