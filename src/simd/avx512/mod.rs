//! AVX-512 register wrappers.
//!
//! Compiled only when the build script both detects AVX-512F on the host and
//! finds a nightly compiler, since the 512-bit intrinsics are still feature
//! gated. Comparisons on this backend come back as `__mmask16` bitmasks
//! rather than full-width lane masks; they are expanded to the numeric
//! {1.0, 0.0} convention with a masked blend so the rest of the crate never
//! sees the difference.

pub mod f32x16;

pub use f32x16::F32x16;
