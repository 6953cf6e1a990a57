#![cfg_attr(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        rustc_channel = "nightly"
    ),
    feature(avx512_target_feature, stdarch_x86_avx512)
)]

//! Fixed-width numeric vectors with one elementwise interface over several
//! execution strategies.
//!
//! The crate exposes a single per-lane arithmetic contract implemented by:
//!
//! 1. [`simd::unrolled::Simd`], a portable engine generic over the scalar
//!    type and lane count, with every lanewise operation expanded at compile
//!    time (no runtime loop, no branch over the lane count).
//! 2. Wide-register wrappers backed by one hardware register each:
//!    `F32x8` / `F64x4` (256-bit AVX) and `F32x16` (512-bit AVX-512), compiled
//!    only when the build script detects the matching CPU feature.
//!
//! Numeric code written against the shared traits in [`simd::traits`] runs
//! unchanged on any backend; which backend a given build instantiates is
//! decided by `build.rs` and nowhere else.
//!
//! # Masks are numbers
//!
//! Comparisons do not produce a boolean or bitmask type. Every comparison
//! yields a vector of the same scalar type whose lanes are exactly `1` where
//! the comparison holds and `0` where it does not. That convention lets masks
//! feed straight back into arithmetic, and it is what makes
//! `cond(test, pass, fail) = test * pass + (1 - test) * fail` a correct
//! branch-free conditional select on every backend.
//!
//! # Memory access modes
//!
//! Loads and stores come in three disciplines, selected by the marker types in
//! [`simd::mem`]: aligned (the default; misalignment is undefined behavior),
//! unaligned, and streaming (non-temporal hint). Streamed stores are not
//! guaranteed visible to other threads until the caller issues
//! [`simd::mem::stream_fence`].
//!
//! # Precision contract
//!
//! `+ - * /` and the fused `fma`/`fms`/`fnma`/`fnms` follow IEEE-754
//! binary32/64 arithmetic on every backend. `rcp` and `rsqrt` are approximate
//! on hardware f32 backends, with relative error at most `1.5 * 2^-12` on AVX
//! and `2^-14` on AVX-512. Reduced accuracy there is the documented
//! trade-off, not a defect.

pub mod error;
pub mod simd;
pub mod utils;

pub use error::LanewiseError;
