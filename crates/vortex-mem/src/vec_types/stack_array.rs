use core::{
    array,
    fmt::Debug,
    iter::Rev,
    ops::{Index, IndexMut, Deref, DerefMut},
    ptr::NonNull,
};

use crate::{
    errors::VecError::{self, IndexOutOfBounds},
    impl_traits,
};

use super::{Iter, IterMut};

/// A fixed-size inline array of exactly `N` live elements.
pub struct StackArray<T, const N: usize>
{
    data: [T; N],
}

impl<T, const N: usize> StackArray<T, N>
{

    pub fn filled(value: T) -> Self
        where
            T: Clone,
    {
        Self {
            data: array::from_fn(|_| value.clone()),
        }
    }

    #[inline(always)]
    pub const fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    #[inline(always)]
    pub fn into_inner(self) -> [T; N] {
        self.data
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, index: usize) -> Result<&T, VecError> {
        self.data.get(index).ok_or(IndexOutOfBounds { index, len: N })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        self.data.get_mut(index).ok_or(IndexOutOfBounds { index, len: N })
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(NonNull::from(&self.data).cast::<T>(), N) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(NonNull::from(&mut self.data).cast::<T>(), N) }
    }

    #[inline(always)]
    pub fn iter_rev(&self) -> Rev<Iter<'_, T>> {
        self.iter().rev()
    }
}

impl_traits! {
    for StackArray<T, N: usize [const]>
    Default where T: Default =>

        fn default() -> Self {
            Self {
                data: array::from_fn(|_| T::default()),
            }
        }
    ,
    From<[T; N]> =>

        #[inline(always)]
        fn from(data: [T; N]) -> Self {
            Self { data }
        }
    ,
    Index<usize> =>

        type Output = T;

        #[inline(always)]
        fn index(&self, index: usize) -> &Self::Output {
            if index >= N {
                panic!("index {} out of bounds for length {}", index, N)
            }
            &self.data[index]
        }
    ,
    IndexMut<usize> =>

        #[inline(always)]
        fn index_mut(&mut self, index: usize) -> &mut Self::Output {
            if index >= N {
                panic!("index {} out of bounds for length {}", index, N)
            }
            &mut self.data[index]
        }
    ,
    Deref =>

        type Target = [T];

        #[inline(always)]
        fn deref(&self) -> &Self::Target {
            &self.data
        }
    ,
    DerefMut =>

        #[inline(always)]
        fn deref_mut(&mut self) -> &mut Self::Target {
            &mut self.data
        }
    ,
    IntoIterator for &'arr =>

        type Item = &'arr T;
        type IntoIter = Iter<'arr, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    ,
    IntoIterator for mut &'arr =>

        type Item = &'arr mut T;
        type IntoIter = IterMut<'arr, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.iter_mut()
        }
    ,
    Clone where T: Clone =>

        #[inline(always)]
        fn clone(&self) -> Self {
            Self { data: self.data.clone() }
        }
    ,
    PartialEq where T: PartialEq =>

        fn eq(&self, rhs: &Self) -> bool {
            self.data == rhs.data
        }
    ,
    Eq where T: Eq =>,
    Debug where T: Debug =>

        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            self.data.fmt(f)
        }
    ,
}
