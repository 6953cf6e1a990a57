//! The portable engine: compile-time-unrolled vectors and the write-through
//! view.
//!
//! Everything in this module is generic over the scalar type and the lane
//! count and compiles on every target; the wide-register backends replace it
//! only where the build script finds matching hardware.

pub mod vector;
pub mod view;

pub use vector::Simd;
pub use view::View;
