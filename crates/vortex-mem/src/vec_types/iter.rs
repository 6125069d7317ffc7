//! Traversal over a contiguous run of initialized elements.
//!
//! A single handle type serves shared and mutable access in both directions:
//! [`Iter`] and [`IterMut`] are double-ended, so reverse traversal is
//! `.rev()`. A handle borrows its container for its whole lifetime, so any
//! operation that reallocates or changes the length (push past capacity,
//! resize, pop, clear) cannot run while a handle is alive.

use core::{
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull,
};

use crate::conditional::{Conditional, True, False};

pub struct IterBase<'a, T, IsMut: Conditional> {
    data: NonNull<T>,
    front: usize,
    back: usize,
    _markers: PhantomData<(&'a T, IsMut)>,
}

pub type Iter<'a, T> = IterBase<'a, T, False>;
pub type IterMut<'a, T> = IterBase<'a, T, True<&'a mut T>>;

unsafe impl<'a, T: Send + Sync, IsMut: Conditional> Send for IterBase<'a, T, IsMut> {}

unsafe impl<'a, T: Send + Sync, IsMut: Conditional> Sync for IterBase<'a, T, IsMut> {}

impl<'a, T, IsMut: Conditional> IterBase<'a, T, IsMut> {

    /// # Safety
    /// `data` must point to `len` initialized elements that stay valid, and
    /// unaliased if `IsMut` is [`True`], for `'a`.
    #[inline(always)]
    pub unsafe fn new(data: NonNull<T>, len: usize) -> Self {
        Self {
            data,
            front: 0,
            back: len,
            _markers: PhantomData,
        }
    }

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.back - self.front
    }
}

impl<'a, T> Clone for Iter<'a, T> {

    fn clone(&self) -> Self {
        Self {
            data: self.data,
            front: self.front,
            back: self.back,
            _markers: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        }
        else {
            let item = unsafe { self.data.add(self.front).as_ref() };
            self.front += 1;
            Some(item)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {

    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        }
        else {
            self.back -= 1;
            Some(unsafe { self.data.add(self.back).as_ref() })
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        }
        else {
            let mut ptr = unsafe { self.data.add(self.front) };
            self.front += 1;
            Some(unsafe { ptr.as_mut() })
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {

    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            None
        }
        else {
            self.back -= 1;
            let mut ptr = unsafe { self.data.add(self.back) };
            Some(unsafe { ptr.as_mut() })
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meets_in_the_middle() {
        let mut data = [1, 2, 3, 4, 5];
        let mut iter = unsafe { Iter::new(NonNull::from(&mut data).cast::<i32>(), 5) };
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn mutable_handle_writes_through() {
        let mut data = [1, 2, 3];
        let iter = unsafe { IterMut::new(NonNull::from(&mut data).cast::<i32>(), 3) };
        for value in iter.rev() {
            *value *= 10;
        }
        assert_eq!(data, [10, 20, 30]);
    }

    #[test]
    fn shared_handle_shortens_element_lifetime() {
        fn shorten<'a>(iter: Iter<'a, &'static str>) -> Iter<'a, &'a str> {
            iter
        }
        let mut data = ["x", "y"];
        let iter = unsafe { Iter::new(NonNull::from(&mut data).cast::<&'static str>(), 2) };
        let local = String::from("x");
        assert_eq!(shorten(iter).filter(|s| **s == local.as_str()).count(), 1);
    }

    #[test]
    fn zero_sized_elements_are_counted() {
        let mut data = [(); 4];
        let iter = unsafe { Iter::new(NonNull::from(&mut data).cast::<()>(), 4) };
        assert_eq!(iter.count(), 4);
    }
}
