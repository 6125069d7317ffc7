use core::fmt::{self, Debug, Formatter};

use alloc::boxed::Box;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A singly-linked list of boxed nodes.
///
/// [`push_back`](Self::push_back) walks to the tail and is O(n), every other
/// operation at the front is O(1).
pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedList<T> {

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            head: None,
            len: 0,
        }
    }

    pub fn with_first(value: T) -> Self {
        Self {
            head: Some(Box::new(Node { value, next: None })),
            len: 1,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_back(&mut self, value: T) -> &mut T {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        self.len += 1;
        &mut cursor.insert(Box::new(Node { value, next: None })).value
    }

    pub fn push_front(&mut self, value: T) -> &mut T {
        let next = self.head.take();
        self.len += 1;
        &mut self.head.insert(Box::new(Node { value, next })).value
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head.take()?;
        self.head = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Unlinks and returns the first element matching `pred`.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
        where
            F: FnMut(&T) -> bool,
    {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| !pred(&node.value)) {
            cursor = &mut cursor.as_mut()?.next;
        }
        let node = cursor.take()?;
        *cursor = node.next;
        self.len -= 1;
        Some(node.value)
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_mut().map(|node| &mut node.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.iter().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.iter_mut().last()
    }

    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            len: self.len,
        }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            len: self.len,
        }
    }

    /// Calls `f` on every element front to back.
    pub fn for_each<F>(&mut self, f: F)
        where
            F: FnMut(&mut T),
    {
        self.iter_mut().for_each(f)
    }
}

impl<T> Drop for LinkedList<T> {

    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T> Default for LinkedList<T> {

    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for LinkedList<T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {

    fn eq(&self, rhs: &Self) -> bool {
        self.len == rhs.len && self.iter().eq(rhs.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {

    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.len -= 1;
        Some(&node.value)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {

    fn clone(&self) -> Self {
        Self {
            next: self.next,
            len: self.len,
        }
    }
}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    len: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {

    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.next.as_deref_mut();
        self.len -= 1;
        Some(&mut node.value)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {

    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {

    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn push_back_keeps_order() {
        let mut list = LinkedList::new();
        for i in 0..5 {
            list.push_back(i);
        }
        assert_eq!(list.len(), 5);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
        assert_eq!(list.front(), Some(&0));
        assert_eq!(list.back(), Some(&4));
    }

    #[test]
    fn push_front_prepends() {
        let mut list = LinkedList::with_first(2);
        list.push_front(1);
        *list.push_front(9) = 0;
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn pop_front_until_empty() {
        let mut list = LinkedList::new();
        list.push_back('a');
        list.push_back('b');
        assert_eq!(list.pop_front(), Some('a'));
        assert_eq!(list.pop_front(), Some('b'));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn remove_first_match_only() {
        let mut list = LinkedList::new();
        for value in [1, 2, 3, 2, 1] {
            list.push_back(value);
        }
        assert_eq!(list.remove_first(|&v| v == 2), Some(2));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3, 2, 1]);
        assert_eq!(list.remove_first(|&v| v == 1), Some(1));
        assert_eq!(list.remove_first(|&v| v == 7), None);
        assert_eq!(list.remove_first(|&v| v == 1), Some(1));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 2]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn for_each_mutates() {
        let mut list = LinkedList::new();
        list.push_back(1);
        list.push_back(2);
        list.for_each(|v| *v *= 10);
        *list.back_mut().unwrap() += 1;
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 21]);
        assert!(list.contains(&10));
        assert!(!list.contains(&20));
    }

    #[test]
    fn drops_every_node() {
        let counter = Rc::new(Cell::new(0));
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }
        {
            let mut list = LinkedList::new();
            for _ in 0..4 {
                list.push_front(Counted(counter.clone()));
            }
            drop(list.pop_front());
            assert_eq!(counter.get(), 1);
        }
        assert_eq!(counter.get(), 4);
    }

    #[test]
    fn long_list_drop_does_not_overflow() {
        let mut list = LinkedList::new();
        for i in 0..200_000u32 {
            list.push_front(i);
        }
        assert_eq!(list.len(), 200_000);
    }

    #[test]
    fn debug_format() {
        let mut list = LinkedList::new();
        list.push_back("x");
        list.push_back("y");
        assert_eq!(format!("{:?}", list), r#"["x", "y"]"#);
    }
}
