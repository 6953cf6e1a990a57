//! Memory-access-mode markers and the streaming fence.
//!
//! The three zero-size types select, at compile time, which load/store
//! discipline a pointer access uses. They carry no state and no pointer; each
//! one forwards to the matching method of [`SimdLoad`]/[`SimdStore`], so
//! `V::load_with::<StreamingMode>(ptr)` and `v.stream_at(ptr)` compile to the
//! same instruction.

use crate::simd::traits::{SimdLoad, SimdStore};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::AlignedMode {}
    impl Sealed for super::UnalignedMode {}
    impl Sealed for super::StreamingMode {}
}

/// A load/store discipline, dispatched at compile time.
///
/// The trait is sealed; the only implementors are [`AlignedMode`],
/// [`UnalignedMode`] and [`StreamingMode`].
pub trait AccessMode: sealed::Sealed + Copy + Default {
    /// Loads one full vector from `ptr` under this mode.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdLoad`] method applies.
    unsafe fn load<T, V: SimdLoad<T>>(ptr: *const T) -> V;

    /// Stores all lanes of `vector` to `ptr` under this mode.
    ///
    /// # Safety
    ///
    /// The pointer contract of the corresponding [`SimdStore`] method applies.
    unsafe fn store<T, V: SimdStore<T>>(vector: &V, ptr: *mut T);
}

/// Default mode: the pointer must satisfy the backend's declared alignment.
///
/// Misalignment is undefined behavior, not a reported error; on the hardware
/// backends it typically faults.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlignedMode;

/// No alignment requirement; costs more on some hardware.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnalignedMode;

/// Non-temporal access for large write-once or read-once sequential buffers.
///
/// The hint asks the hardware not to pollute the cache. A streamed store is
/// visible to the issuing thread's subsequent reads, but other threads must
/// not observe the buffer until the writer calls [`stream_fence`]; that fence
/// is a caller obligation the vector types cannot enforce.
#[derive(Copy, Clone, Debug, Default)]
pub struct StreamingMode;

impl AccessMode for AlignedMode {
    #[inline(always)]
    unsafe fn load<T, V: SimdLoad<T>>(ptr: *const T) -> V {
        V::load(ptr)
    }

    #[inline(always)]
    unsafe fn store<T, V: SimdStore<T>>(vector: &V, ptr: *mut T) {
        vector.store_at(ptr)
    }
}

impl AccessMode for UnalignedMode {
    #[inline(always)]
    unsafe fn load<T, V: SimdLoad<T>>(ptr: *const T) -> V {
        V::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn store<T, V: SimdStore<T>>(vector: &V, ptr: *mut T) {
        vector.store_unaligned_at(ptr)
    }
}

impl AccessMode for StreamingMode {
    #[inline(always)]
    unsafe fn load<T, V: SimdLoad<T>>(ptr: *const T) -> V {
        V::load_stream(ptr)
    }

    #[inline(always)]
    unsafe fn store<T, V: SimdStore<T>>(vector: &V, ptr: *mut T) {
        vector.stream_at(ptr)
    }
}

/// Orders streamed stores before any subsequent store, making buffers written
/// with [`StreamingMode`] safe to hand to another thread.
///
/// On x86 this is `sfence`; elsewhere a release fence, which is at least as
/// strong.
#[inline]
pub fn stream_fence() {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        std::arch::x86_64::_mm_sfence()
    }

    #[cfg(target_arch = "x86")]
    unsafe {
        std::arch::x86::_mm_sfence()
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    std::sync::atomic::fence(std::sync::atomic::Ordering::Release);
}
