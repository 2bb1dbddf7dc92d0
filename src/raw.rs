use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::ArrayError;

/// Owned block of `capacity` uninitialized slots of `T`.
///
/// The buffer never knows which of its slots hold live values. That is the
/// owner's bookkeeping, and every slot accessor is `unsafe` for that reason.
/// Dropping a `RawBuf` releases the memory but never runs `T`'s destructor.
///
/// Zero-sized types get no real allocation, but the requested capacity is
/// still recorded so capacity arithmetic behaves the same for every `T`.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Buffer without an allocation.
    pub const fn new() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Reserves exactly `capacity` slots. Nothing is constructed.
    pub fn allocate(capacity: usize) -> Result<RawBuf<T>, ArrayError> {
        if capacity == 0 {
            return Ok(RawBuf::new());
        }
        if Self::IS_ZST {
            return Ok(RawBuf {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }

        let layout = Self::layout_for(capacity)?;
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        let ptr = NonNull::new(ptr).ok_or(ArrayError::AllocFailed { layout })?;
        trace!("allocated {} slots ({} bytes)", capacity, layout.size());

        Ok(RawBuf {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, ArrayError> {
        let overflow = ArrayError::CapacityOverflow { requested: capacity };
        let layout = Layout::array::<T>(capacity).map_err(|_| overflow.clone())?;
        if layout.size() > isize::MAX as usize {
            return Err(overflow);
        }
        Ok(layout)
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    unsafe fn slot_ptr(&self, index: usize) -> *mut T {
        debug_assert!(index < self.capacity, "slot {} outside capacity {}", index, self.capacity);
        self.ptr.as_ptr().add(index)
    }

    /// Constructs `value` in slot `index`. The slot must be uninitialized,
    /// otherwise its previous value leaks.
    #[inline(always)]
    pub unsafe fn write_slot(&mut self, index: usize, value: T) {
        ptr::write(self.slot_ptr(index), value);
    }

    /// Moves the value out of slot `index`, which becomes uninitialized.
    #[inline(always)]
    pub unsafe fn read_slot(&mut self, index: usize) -> T {
        ptr::read(self.slot_ptr(index))
    }

    /// Drops the values in `[start, end)` in increasing index order.
    pub unsafe fn drop_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.capacity);
        if start == end {
            return;
        }
        let first = self.ptr.as_ptr().add(start);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, end - start));
    }

    #[inline(always)]
    pub unsafe fn slot(&self, index: usize) -> &T {
        &*self.slot_ptr(index)
    }

    #[inline(always)]
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut *self.slot_ptr(index)
    }

    /// The first `len` slots as a slice. They must all be initialized.
    #[inline(always)]
    pub unsafe fn slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        std::slice::from_raw_parts(self.ptr.as_ptr(), len)
    }

    #[inline(always)]
    pub unsafe fn slice_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);
        std::slice::from_raw_parts_mut(self.ptr.as_ptr(), len)
    }

    /// Moves the first `count` values into the same slots of `dst`, in index
    /// order. Afterwards those slots of `self` count as uninitialized and
    /// those of `dst` as initialized.
    ///
    /// A move is a bitwise copy, so this cannot fail halfway.
    pub unsafe fn relocate_into(&mut self, dst: &mut RawBuf<T>, count: usize) {
        debug_assert!(count <= self.capacity && count <= dst.capacity);
        if count == 0 {
            return;
        }
        ptr::copy_nonoverlapping(self.ptr.as_ptr(), dst.ptr.as_ptr(), count);
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || Self::IS_ZST {
            return;
        }
        trace!("releasing {} slots", self.capacity);
        unsafe {
            // the same layout was validated when the buffer was allocated
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.capacity,
                mem::align_of::<T>(),
            );
            alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
        }
    }
}
