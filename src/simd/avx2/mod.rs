//! 256-bit wide-register backends.
//!
//! Compiled only when the build script detects AVX2 (which implies AVX and
//! FMA on every CPU this crate targets). Two wrappers live here, one per
//! element type at the 256-bit width:
//!
//! - [`f32x8::F32x8`]: 8 x f32, one `__m256` register
//! - [`f64x4::F64x4`]: 4 x f64, one `__m256d` register
//!
//! Both expose the same logical contract as the unrolled engine; the only
//! observable differences are the documented approximate `rcp`/`rsqrt`
//! operations and the wider 32-byte alignment requirement of the aligned and
//! streaming access modes.

pub mod f32x8;
pub mod f64x4;

pub use f32x8::F32x8;
pub use f64x4::F64x4;
