//! Aligned heap storage for the register-alignment-sensitive access modes.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ops::{Deref, DerefMut};
use std::slice;

use crate::error::LanewiseError;

/// A zero-initialized heap buffer of `T` with a caller-chosen alignment.
///
/// The aligned and streaming load/store modes require their pointers to sit
/// on a register-width boundary (32 bytes for AVX, 64 for AVX-512), which a
/// plain `Vec<T>` does not guarantee. This owns an allocation sized for `len`
/// elements at the requested alignment and derefs to a slice.
///
/// ```
/// use lanewise::utils::AlignedBuffer;
///
/// let mut buf = AlignedBuffer::<f32>::new(64, 32).unwrap();
/// buf[0] = 1.0;
/// assert_eq!(buf.as_ptr() as usize % 32, 0);
/// ```
pub struct AlignedBuffer<T> {
    ptr: *mut T,
    len: usize,
    layout: Layout,
}

impl<T> AlignedBuffer<T> {
    /// Allocates a zeroed buffer of `len` elements aligned to `align` bytes.
    ///
    /// The only failure mode is the returned error: a non-power-of-two
    /// `align`, a total size overflowing the layout limit, or allocator
    /// exhaustion. An alignment below the natural alignment of `T` is raised
    /// to it; a zero `len` yields an empty buffer without allocating.
    pub fn new(len: usize, align: usize) -> Result<Self, LanewiseError> {
        let align = align.max(std::mem::align_of::<T>());
        let layout = Layout::array::<T>(len)?.align_to(align)?;

        let ptr = if layout.size() == 0 {
            std::ptr::NonNull::<T>::dangling().as_ptr()
        } else {
            let ptr = unsafe { alloc_zeroed(layout) as *mut T };
            if ptr.is_null() {
                return Err(LanewiseError::Allocation {
                    size: layout.size(),
                    align: layout.align(),
                });
            }
            ptr
        };

        Ok(Self { ptr, len, layout })
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }
}

impl<T> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<T> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl<T> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        // zero-size buffers hold a dangling pointer, not an allocation
        if self.layout.size() != 0 {
            unsafe { dealloc(self.ptr as *mut u8, self.layout) };
        }
    }
}

// The buffer owns its allocation exclusively, so it is as thread-safe as the
// element type.
unsafe impl<T: Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Sync> Sync for AlignedBuffer<T> {}
