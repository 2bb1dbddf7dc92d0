use std::mem;
use std::ops::{Index, IndexMut};

use crate::ArrayError;

/// Fixed-size array stored inline, with the same access contract as
/// `DynamicArray`: checked `at`, panicking `[]`, `unsafe` unchecked access.
#[derive(Clone, Copy, Debug, Hash)]
pub struct FixedArray<T, const N: usize> {
    items: [T; N],
}

struct InBounds<const I: usize, const N: usize>;

impl<const I: usize, const N: usize> InBounds<I, N> {
    const OK: () = assert!(I < N, "constant index out of bounds");
}

impl<T, const N: usize> FixedArray<T, N> {
    pub const fn new(items: [T; N]) -> FixedArray<T, N> {
        FixedArray { items }
    }

    #[inline(always)]
    pub const fn size(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn max_size(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn empty(&self) -> bool {
        N == 0
    }

    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        self.items.get(index).ok_or(ArrayError::OutOfRange { index, len: N })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        self.items.get_mut(index).ok_or(ArrayError::OutOfRange { index, len: N })
    }

    /// # Safety
    ///
    /// `index` must be less than `N`. Debug builds assert this.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < N, "index {} out of range for length {}", index, N);
        self.items.get_unchecked(index)
    }

    /// # Safety
    ///
    /// `index` must be less than `N`. Debug builds assert this.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < N, "index {} out of range for length {}", index, N);
        self.items.get_unchecked_mut(index)
    }

    /// Element `I`, bounds-checked at compile time.
    #[inline(always)]
    pub fn get<const I: usize>(&self) -> &T {
        let () = InBounds::<I, N>::OK;
        &self.items[I]
    }

    #[inline(always)]
    pub fn get_mut<const I: usize>(&mut self) -> &mut T {
        let () = InBounds::<I, N>::OK;
        &mut self.items[I]
    }

    pub fn front(&self) -> Result<&T, ArrayError> {
        self.at(0)
    }

    pub fn back(&self) -> Result<&T, ArrayError> {
        match N.checked_sub(1) {
            Some(last) => self.at(last),
            None => Err(ArrayError::OutOfRange { index: 0, len: 0 }),
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Overwrites every element with a clone of `value`.
    pub fn fill(&mut self, value: &T) where T: Clone {
        for i in 0..N {
            self.items[i] = value.clone();
        }
    }

    pub fn swap(&mut self, other: &mut FixedArray<T, N>) {
        mem::swap(&mut self.items, &mut other.items);
    }

    pub fn into_inner(self) -> [T; N] {
        self.items
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(items: [T; N]) -> Self {
        FixedArray::new(items)
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}
