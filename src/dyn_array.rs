use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::growth::grown_capacity;
use crate::guard::FillGuard;
use crate::raw::RawBuf;
use crate::ArrayError;

/// Growable contiguous array that manages its own storage.
///
/// The first `len` slots of the buffer hold live values; the remaining
/// `capacity - len` slots are allocated but uninitialized. Appends grow the
/// buffer by half again its size, and every capacity change goes through a
/// single reallocation routine that builds the new buffer before touching
/// the old one.
///
/// References handed out by the accessors borrow the array, so nothing can
/// hold them across an operation that reallocates.
pub struct DynamicArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

/// Turns a failed reservation into the infallible API's behavior: overflow
/// panics, allocator exhaustion goes to the global OOM handler.
#[cold]
fn reserve_failed(err: ArrayError) -> ! {
    match err {
        ArrayError::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
        other => panic!("{}", other),
    }
}

impl<T> DynamicArray<T> {
    /// Empty array. Nothing is allocated until the first element arrives.
    pub const fn new() -> DynamicArray<T> {
        DynamicArray {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Empty array with exactly `capacity` reserved slots.
    pub fn with_capacity(capacity: usize) -> DynamicArray<T> {
        let buf = RawBuf::allocate(capacity).unwrap_or_else(|err| reserve_failed(err));
        DynamicArray { buf, len: 0 }
    }

    /// Array of `len` default values, with no spare capacity.
    pub fn with_len(len: usize) -> DynamicArray<T> where T: Default {
        let mut array = DynamicArray::with_capacity(len);
        array.fill_to(len, |_| T::default());
        array
    }

    /// Array of `len` clones of `value`, with no spare capacity.
    pub fn from_elem(len: usize, value: &T) -> DynamicArray<T> where T: Clone {
        let mut array = DynamicArray::with_capacity(len);
        array.fill_to(len, |_| value.clone());
        array
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    /// Checked access; `OutOfRange` when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfRange { index, len: self.len });
        }
        Ok(unsafe { self.buf.slot(index) })
    }

    /// Checked mutable access; `OutOfRange` when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::OutOfRange { index, len: self.len });
        }
        Ok(unsafe { self.buf.slot_mut(index) })
    }

    /// Access without a bounds check in release builds.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. Debug builds assert this.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {} out of range for length {}", index, self.len);
        self.buf.slot(index)
    }

    /// Mutable access without a bounds check in release builds.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. Debug builds assert this.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of range for length {}", index, self.len);
        self.buf.slot_mut(index)
    }

    pub fn front(&self) -> Result<&T, ArrayError> {
        self.at(0)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, ArrayError> {
        self.at_mut(0)
    }

    pub fn back(&self) -> Result<&T, ArrayError> {
        match self.len {
            0 => Err(ArrayError::OutOfRange { index: 0, len: 0 }),
            len => self.at(len - 1),
        }
    }

    pub fn back_mut(&mut self) -> Result<&mut T, ArrayError> {
        match self.len {
            0 => Err(ArrayError::OutOfRange { index: 0, len: 0 }),
            len => self.at_mut(len - 1),
        }
    }

    /// The live elements as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buf.slice(self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buf.slice_mut(self.len) }
    }

    /// Start of the buffer. Dangling (but non-null) while nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Moves the live elements into a buffer of exactly `new_capacity` slots.
    ///
    /// The new buffer is allocated before anything else happens, so a failed
    /// allocation leaves the array untouched. Elements past `new_capacity`
    /// are dropped only after the new buffer has been committed.
    fn reallocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity == self.buf.capacity() {
            return Ok(());
        }

        let mut new_buf = RawBuf::allocate(new_capacity)?;
        let old_len = self.len;
        let kept = old_len.min(new_capacity);
        trace!(
            "reallocate {} -> {} slots, relocating {} elements",
            self.buf.capacity(),
            new_capacity,
            kept
        );

        unsafe { self.buf.relocate_into(&mut new_buf, kept) };
        let mut old_buf = mem::replace(&mut self.buf, new_buf);
        self.len = kept;
        unsafe { old_buf.drop_range(kept, old_len) };
        Ok(())
    }

    fn reallocate_or_fail(&mut self, new_capacity: usize) {
        if let Err(err) = self.reallocate(new_capacity) {
            reserve_failed(err);
        }
    }

    /// Grows the buffer to exactly `new_capacity` slots. Never shrinks.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.reallocate_or_fail(new_capacity);
        }
    }

    /// Like `reserve`, but reports overflow and allocation failure instead
    /// of panicking. On error the array is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if new_capacity > self.capacity() {
            self.reallocate(new_capacity)?;
        }
        Ok(())
    }

    /// Releases spare capacity so that `capacity() == len()`.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() != self.len {
            if self.len == 0 {
                debug!("shrink_to_fit releases all {} slots", self.capacity());
            }
            self.reallocate_or_fail(self.len);
        }
    }

    /// Constructs `[len, new_len)` from `make(index)` in increasing index
    /// order. Capacity must already cover `new_len`.
    fn fill_to(&mut self, new_len: usize, mut make: impl FnMut(usize) -> T) {
        debug_assert!(new_len <= self.buf.capacity());
        let DynamicArray { buf, len } = self;
        let mut guard = FillGuard::new(len);
        while guard.current() < new_len {
            let index = guard.current();
            unsafe { buf.write_slot(index, make(index)) };
            guard.commit_one();
        }
    }

    /// Drops `[new_len, len)`. The length is lowered first, so a panicking
    /// destructor leaks the rest instead of dropping anything twice.
    fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        self.len = new_len;
        unsafe { self.buf.drop_range(new_len, old_len) };
    }

    /// Shrinks by dropping the tail, or grows by constructing each new slot
    /// from `make()`. Growth reallocates to exactly `new_len`, not by the
    /// append growth rule.
    pub fn resize_with(&mut self, new_len: usize, mut make: impl FnMut() -> T) {
        if new_len < self.len {
            self.truncate(new_len);
        } else if new_len > self.len {
            if new_len > self.capacity() {
                self.reallocate_or_fail(new_len);
            }
            self.fill_to(new_len, |_| make());
        }
    }

    /// `resize_with` using `T::default()` for new slots.
    pub fn resize(&mut self, new_len: usize) where T: Default {
        self.resize_with(new_len, T::default);
    }

    /// `resize_with` using clones of `value` for new slots.
    pub fn resize_value(&mut self, new_len: usize, value: &T) where T: Clone {
        self.resize_with(new_len, || value.clone());
    }

    /// Makes room for one more element using the amortized growth rule.
    fn grow_for_append(&mut self) -> Result<(), ArrayError> {
        if self.len < self.capacity() {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.capacity(), self.len)
            .ok_or(ArrayError::CapacityOverflow { requested: usize::MAX })?;
        self.reallocate(new_capacity)
    }

    /// Appends the value built by `make`, growing first if the buffer is full.
    /// If `make` panics the array keeps its elements (and any new capacity).
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) {
        if let Err(err) = self.grow_for_append() {
            reserve_failed(err);
        }
        unsafe { self.buf.write_slot(self.len, make()) };
        self.len += 1;
    }

    pub fn push_back(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Appends `value`, or hands it back with the error if the buffer could
    /// not grow.
    pub fn try_push_back(&mut self, value: T) -> Result<(), (T, ArrayError)> {
        if let Err(err) = self.grow_for_append() {
            return Err((value, err));
        }
        unsafe { self.buf.write_slot(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Removes the last element and returns it. Capacity is kept.
    pub fn pop_back(&mut self) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::EmptyPop);
        }
        self.len -= 1;
        Ok(unsafe { self.buf.read_slot(self.len) })
    }

    /// Drops every element in index order. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Replaces the contents with `len` clones of `value`.
    ///
    /// When the current buffer is too small it is thrown away and a buffer of
    /// exactly `len` slots takes its place; nothing is relocated because every
    /// old element has already been dropped.
    pub fn assign(&mut self, len: usize, value: &T) where T: Clone {
        self.clear();
        if len > self.capacity() {
            debug!("assign replaces {} slots with {}", self.capacity(), len);
            self.buf = RawBuf::allocate(len).unwrap_or_else(|err| reserve_failed(err));
        }
        self.fill_to(len, |_| value.clone());
    }

    /// Exchanges contents and buffers with `other` without touching elements.
    pub fn swap(&mut self, other: &mut DynamicArray<T>) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving this array with no elements and no
    /// allocation.
    pub fn take(&mut self) -> DynamicArray<T> {
        mem::replace(self, DynamicArray::new())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
        // `buf` releases the memory afterwards
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        DynamicArray::new()
    }
}

impl<T> Clone for DynamicArray<T> where T: Clone {
    /// Deep copy into a buffer with the same capacity as the source.
    fn clone(&self) -> Self {
        let mut copy = DynamicArray::with_capacity(self.capacity());
        copy.fill_to(self.len, |index| unsafe { self.get_unchecked(index).clone() });
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if self.capacity() != source.capacity() {
            debug!("clone_from replaces {} slots with {}", self.capacity(), source.capacity());
            self.buf = RawBuf::allocate(source.capacity()).unwrap_or_else(|err| reserve_failed(err));
        }
        self.fill_to(source.len, |index| unsafe { source.get_unchecked(index).clone() });
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> fmt::Debug for DynamicArray<T> where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.len {
            list.entry(&self[i]);
        }
        list.finish()
    }
}
