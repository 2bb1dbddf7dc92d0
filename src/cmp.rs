//! Element-wise equality and lexicographic ordering shared by both array
//! types. The operator traits delegate here.

use std::cmp::Ordering;
use std::mem;
use std::ptr;

use crate::{DynamicArray, FixedArray};

/// Address and length match. Every slice of zero-sized values shares one
/// address, so those never count as the same storage.
#[inline(always)]
fn same_storage<T>(lhs: &[T], rhs: &[T]) -> bool {
    mem::size_of::<T>() != 0 && ptr::eq(lhs, rhs)
}

/// Same length and pairwise-equal elements. Two views of the very same
/// memory compare equal without looking at the elements.
pub fn equal<T: PartialEq>(lhs: &[T], rhs: &[T]) -> bool {
    if same_storage(lhs, rhs) {
        return true;
    }
    if lhs.len() != rhs.len() {
        return false;
    }
    for i in 0..lhs.len() {
        if lhs[i] != rhs[i] {
            return false;
        }
    }
    true
}

/// Lexicographic ordering: the first differing element decides, otherwise
/// the shorter sequence is less. `None` when a pair of elements is
/// incomparable.
pub fn compare<T: PartialOrd>(lhs: &[T], rhs: &[T]) -> Option<Ordering> {
    if same_storage(lhs, rhs) {
        return Some(Ordering::Equal);
    }
    let common = lhs.len().min(rhs.len());
    for i in 0..common {
        match lhs[i].partial_cmp(&rhs[i]) {
            Some(Ordering::Equal) => {}
            decided => return decided,
        }
    }
    Some(lhs.len().cmp(&rhs.len()))
}

/// `compare` for totally ordered elements.
pub fn compare_total<T: Ord>(lhs: &[T], rhs: &[T]) -> Ordering {
    if same_storage(lhs, rhs) {
        return Ordering::Equal;
    }
    let common = lhs.len().min(rhs.len());
    for i in 0..common {
        match lhs[i].cmp(&rhs[i]) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
    lhs.len().cmp(&rhs.len())
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || equal(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        equal(self.as_slice(), other)
    }
}

impl<T: PartialEq, const M: usize> PartialEq<[T; M]> for DynamicArray<T> {
    fn eq(&self, other: &[T; M]) -> bool {
        equal(self.as_slice(), &other[..])
    }
}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if ptr::eq(self, other) {
            return Some(Ordering::Equal);
        }
        compare(self.as_slice(), other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if ptr::eq(self, other) {
            return Ordering::Equal;
        }
        compare_total(self.as_slice(), other.as_slice())
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedArray<T, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || equal(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq, const N: usize> Eq for FixedArray<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for FixedArray<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if ptr::eq(self, other) {
            return Some(Ordering::Equal);
        }
        compare(self.as_slice(), other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for FixedArray<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        if ptr::eq(self, other) {
            return Ordering::Equal;
        }
        compare_total(self.as_slice(), other.as_slice())
    }
}

#[cfg(test)]
mod cmp_tests {
    use super::{compare, compare_total, equal};
    use crate::{DynamicArray, FixedArray};
    use proptest::prelude::*;
    use std::cmp::Ordering;

    fn array(values: &[i32]) -> DynamicArray<i32> {
        let mut array = DynamicArray::with_capacity(values.len());
        for v in values {
            array.push_back(*v);
        }
        array
    }

    #[test]
    fn shorter_prefix_is_less() {
        assert!(array(&[0, 1, 2]) < array(&[0, 1, 2, 5]));
        assert!(array(&[0, 1, 2, 5]) > array(&[0, 1, 2]));
        assert!(array(&[]) < array(&[0]));
    }

    #[test]
    fn first_difference_decides() {
        assert!(array(&[0, 1, 2]) < array(&[0, 1, 3]));
        assert!(array(&[0, 9]) > array(&[0, 1, 2, 3]));
        assert_eq!(Ordering::Less, compare_total(&[1, 5], &[2]));
    }

    #[test]
    fn equality_needs_equal_length() {
        assert_eq!(array(&[0, 1, 2]), array(&[0, 1, 2]));
        assert_ne!(array(&[0, 1, 2]), array(&[0, 1, 2, 0]));
        assert!(array(&[0, 1, 2]) <= array(&[0, 1, 2]));
        assert!(array(&[0, 1, 2]) >= array(&[0, 1, 2]));
        assert_eq!(array(&[4, 5]), [4, 5]);
        assert_eq!(array(&[4, 5]), [4, 5][..]);
    }

    #[test]
    fn capacity_does_not_affect_equality() {
        let mut roomy = DynamicArray::with_capacity(32);
        roomy.push_back(1);
        assert_eq!(array(&[1]), roomy);
    }

    #[test]
    fn identical_storage_short_circuits() {
        let values = [f64::NAN, 1.0];
        assert!(equal(&values, &values));
        assert_eq!(Some(Ordering::Equal), compare(&values, &values));
        assert!(!equal(&values[..], &[f64::NAN, 1.0][..]));
        assert_eq!(None, compare(&values[..], &[f64::NAN, 1.0][..]));
    }

    /// Zero-sized element that is unequal to everything, itself included.
    #[derive(Debug)]
    struct Unequal;

    impl PartialEq for Unequal {
        fn eq(&self, _other: &Self) -> bool {
            false
        }
    }

    impl PartialOrd for Unequal {
        fn partial_cmp(&self, _other: &Self) -> Option<Ordering> {
            None
        }
    }

    #[test]
    fn distinct_zero_sized_arrays_compare_their_elements() {
        let mut a = DynamicArray::new();
        a.push_back(Unequal);
        let mut b = DynamicArray::new();
        b.push_back(Unequal);
        assert_eq!(a.as_ptr(), b.as_ptr());
        assert!(a != b);
        assert_eq!(None, a.partial_cmp(&b));
        assert!(!equal(&[Unequal], &[Unequal]));

        assert!(PartialEq::eq(&a, &a));
        assert_eq!(Some(Ordering::Equal), PartialOrd::partial_cmp(&a, &a));

        let fixed = FixedArray::new([Unequal, Unequal]);
        assert!(fixed != FixedArray::new([Unequal, Unequal]));
        assert!(PartialEq::eq(&fixed, &fixed));
    }

    #[test]
    fn distinct_empty_arrays_are_equal() {
        let (a, b) = (DynamicArray::<i32>::new(), DynamicArray::<i32>::new());
        assert_eq!(a, b);
        assert_eq!(Ordering::Equal, a.cmp(&b));
    }

    #[test]
    fn fixed_arrays_compare_element_wise() {
        let a = FixedArray::new([1, 2, 3]);
        let b = FixedArray::new([1, 2, 4]);
        assert!(a < b);
        assert_ne!(a, b);
        assert_eq!(a, FixedArray::new([1, 2, 3]));
        assert_eq!(Ordering::Greater, b.cmp(&a));
    }

    proptest! {
        #[test]
        fn ordering_agrees_with_slices(
            lhs in proptest::collection::vec(0i32..4, 0..8),
            rhs in proptest::collection::vec(0i32..4, 0..8),
        ) {
            let (a, b) = (array(&lhs), array(&rhs));
            prop_assert_eq!(lhs.cmp(&rhs), a.cmp(&b));
            prop_assert_eq!(lhs == rhs, a == b);
        }
    }
}
