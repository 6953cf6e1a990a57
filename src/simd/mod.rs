//! Backend modules and the shared trait surface.
//!
//! [`unrolled`] is always available. The wide-register backends are gated on
//! the cfg flags emitted by the build script: [`avx2`] when the host supports
//! AVX2, [`avx512`] when it additionally supports AVX-512F and the compiler is
//! a nightly channel.

#[cfg(avx2)]
pub mod avx2;

#[cfg(avx512)]
pub mod avx512;

pub mod mem;
pub mod ops;
pub mod traits;
pub mod unrolled;

pub use mem::{stream_fence, AccessMode, AlignedMode, StreamingMode, UnalignedMode};
pub use traits::{Alignment, SimdCompare, SimdFused, SimdLoad, SimdMath, SimdSelect, SimdStore};
