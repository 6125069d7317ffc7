use core::{
    marker::PhantomData,
    ptr::NonNull,
};

use alloc::alloc::{Layout, alloc, dealloc};

use crate::VecError::{self, AllocFailed, CapacityOverflow};

/// An exclusively owned, uninitialized block of `capacity` slots of `T`.
///
/// The block is released exactly once when the buffer is dropped. Elements
/// stored in the block are never dropped here; that is the owner's job.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuf<T> {}

unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {

    #[inline(always)]
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates `capacity` slots. Zero capacities and zero-sized types
    /// never touch the allocator.
    pub fn allocate(capacity: usize) -> Result<Self, VecError> {
        if capacity == 0 {
            return Ok(Self::dangling())
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| CapacityOverflow { requested: capacity })?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            })
        }
        let ptr = unsafe { alloc(layout) };
        let ptr = NonNull::new(ptr.cast::<T>())
            .ok_or(AllocFailed { new_capacity: capacity })?;
        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    pub fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Drop for RawBuf<T> {

    fn drop(&mut self) {
        if self.capacity == 0 {
            return
        }
        let layout = match Layout::array::<T>(self.capacity) {
            Ok(l) => l,
            Err(_) => return,
        };
        if layout.size() == 0 {
            return
        }
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_dangling() {
        let buf = RawBuf::<u64>::allocate(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.ptr(), NonNull::dangling());
    }

    #[test]
    fn allocates_requested_slots() {
        let buf = RawBuf::<u32>::allocate(16).unwrap();
        assert_eq!(buf.capacity(), 16);
        unsafe {
            for i in 0..16 {
                buf.ptr().add(i).write(i as u32);
            }
            assert_eq!(buf.ptr().add(15).read(), 15);
        }
    }

    #[test]
    fn layout_overflow_is_reported() {
        let err = RawBuf::<u64>::allocate(usize::MAX).err();
        assert_eq!(err, Some(VecError::CapacityOverflow { requested: usize::MAX }));
    }

    #[test]
    fn zero_sized_types_skip_the_allocator() {
        let buf = RawBuf::<()>::allocate(usize::MAX).unwrap();
        assert_eq!(buf.capacity(), usize::MAX);
    }
}
