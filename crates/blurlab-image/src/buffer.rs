use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::ImageError;

/// Alignment in bytes of every image plane allocation.
pub const BUFFER_ALIGNMENT: usize = 64;

/// Owned, 64-byte aligned f32 storage backing a planar image.
///
/// Zero-initialized on allocation and freed on drop; never shared, so a move
/// is the only way ownership changes hands.
pub(crate) struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocates a zeroed buffer of `len` floats. `len` must be non-zero.
    pub(crate) fn zeroed(len: usize) -> Result<Self, ImageError> {
        debug_assert!(len > 0);
        let size = len
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or(ImageError::AllocationFailed(usize::MAX))?;
        let layout = Layout::from_size_align(size, BUFFER_ALIGNMENT)
            .map_err(|_| ImageError::AllocationFailed(size))?;
        // SAFETY: layout has non-zero size (len > 0)
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(ptr as *mut f32).ok_or(ImageError::AllocationFailed(size))?;
        Ok(Self { ptr, len, layout })
    }

    pub(crate) fn as_slice(&self) -> &[f32] {
        // SAFETY: ptr is valid for len floats for the lifetime of self
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: ptr is valid for len floats and exclusively borrowed here
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl Clone for AlignedBuffer {
    fn clone(&self) -> Self {
        // Allocation failure during clone maps to the global handler, the
        // same contract Vec::clone has.
        let mut out =
            Self::zeroed(self.len).unwrap_or_else(|_| alloc::handle_alloc_error(self.layout));
        out.as_mut_slice().copy_from_slice(self.as_slice());
        out
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated in `zeroed` with this exact layout
        unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) }
    }
}

// SAFETY: the buffer is exclusively owned and f32 is Send
unsafe impl Send for AlignedBuffer {}

// SAFETY: shared access only hands out immutable slices
unsafe impl Sync for AlignedBuffer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_is_aligned_and_clean() -> Result<(), ImageError> {
        let buf = AlignedBuffer::zeroed(1024)?;
        assert_eq!(buf.as_slice().as_ptr() as usize % BUFFER_ALIGNMENT, 0);
        assert_eq!(buf.len(), 1024);
        assert!(buf.as_slice().iter().all(|&x| x == 0.0));
        Ok(())
    }

    #[test]
    fn clone_is_deep() -> Result<(), ImageError> {
        let mut buf = AlignedBuffer::zeroed(16)?;
        buf.as_mut_slice()[3] = 7.0;
        let copy = buf.clone();
        buf.as_mut_slice()[3] = 0.0;
        assert_eq!(copy.as_slice()[3], 7.0);
        assert_eq!(copy.as_slice().as_ptr() as usize % BUFFER_ALIGNMENT, 0);
        Ok(())
    }
}
