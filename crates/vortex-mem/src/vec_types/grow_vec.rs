use core::{
    fmt::{Debug, Display},
    iter::Rev,
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut, Deref, DerefMut},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    capacity_policy::{CapacityPolicy, Doubling, Fixed},
    errors::VecError::{self, CapacityOverflow, Empty, FixedCapacity, IndexOutOfBounds},
    raw_buf::RawBuf,
    const_assert,
    impl_traits,
    Result,
};

use super::{Iter, IterMut};

/// Capacity allocated by [`GrowVec::new`].
pub const INITIAL_CAPACITY: usize = 2;

/// A contiguous, growable array.
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// allocated but uninitialized. The buffer is owned by exactly one vector
/// and released once when it drops.
///
/// Growth is decided by `P`: [`Doubling`] doubles the capacity when a push
/// finds the vector full, [`Fixed`] refuses and reports
/// [`VecError::FixedCapacity`].
pub struct GrowVec<T, P = Doubling>
    where
        P: CapacityPolicy,
{
    buf: RawBuf<T>,
    len: usize,
    _policy: PhantomData<P>,
}

/// A [`GrowVec`] that never grows implicitly.
pub type FixedVec<T> = GrowVec<T, Fixed>;

const_assert!(size_of::<GrowVec<u32>>() == size_of::<Option<GrowVec<u32>>>());

impl<T, P> GrowVec<T, P>
    where
        P: CapacityPolicy,
{

    /// Creates a vector without allocating. Capacity is zero.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            buf: RawBuf::dangling(),
            len: 0,
            _policy: PhantomData,
        }
    }

    /// Creates an empty vector with [`INITIAL_CAPACITY`] slots.
    #[inline(always)]
    pub fn new() -> Result<Self> {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            buf: RawBuf::allocate(capacity)?,
            len: 0,
            _policy: PhantomData,
        })
    }

    /// Creates a vector of `len` clones of `value` with capacity `len`.
    pub fn with_len(len: usize, value: T) -> Result<Self>
        where
            T: Clone
    {
        let mut vec = Self::with_capacity(len)?;
        for _ in 0..len {
            unsafe { vec.write_next(value.clone()) }
        }
        Ok(vec)
    }

    /// Creates a vector holding `array` in order, with capacity `N`.
    pub fn from_array<const N: usize>(array: [T; N]) -> Result<Self> {
        let mut vec = Self::with_capacity(N)?;
        for value in array {
            unsafe { vec.write_next(value) }
        }
        Ok(vec)
    }

    /// Creates a vector of clones of `slice`, with capacity `slice.len()`.
    pub fn from_slice(slice: &[T]) -> Result<Self>
        where
            T: Clone
    {
        let mut vec = Self::with_capacity(slice.len())?;
        for value in slice {
            unsafe { vec.write_next(value.clone()) }
        }
        Ok(vec)
    }

    /// Moves the whole buffer out, leaving `self` empty with zero capacity.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Clones into an independent buffer whose capacity is `self.len()`.
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        Self::from_slice(self.as_slice())
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
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Ensures at least `capacity` slots, growing through the capacity policy.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(())
        }
        if !P::can_grow() {
            return Err(FixedCapacity { capacity: self.capacity() })
        }
        let new_capacity = P::grow(self.capacity(), capacity)
            .ok_or(FixedCapacity { capacity: self.capacity() })?;
        self.reallocate(new_capacity)
    }

    /// Reallocates to exactly `capacity` slots.
    ///
    /// The first `min(len, capacity)` elements are kept in order. Shrinking
    /// below `len` drops the elements that no longer fit; otherwise `len` is
    /// untouched. On error the vector is left as it was.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        if capacity == self.capacity() {
            return Ok(())
        }
        self.reallocate(capacity)
    }

    pub fn push(&mut self, value: T) -> Result<&mut T> {
        if self.len == self.capacity() {
            let required = self.len
                .checked_add(1)
                .ok_or(CapacityOverflow { requested: self.len })?;
            self.reserve(required)?;
        }
        unsafe {
            let mut ptr = self.buf.ptr().add(self.len);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Empty)
        }
        self.len -= 1;
        Ok(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Removes the element at `index`, moving the last element into its slot.
    pub fn swap_remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        let ptr = self.buf.ptr();
        self.len -= 1;
        unsafe {
            let removed = ptr.add(index).read();
            if index != self.len {
                ptr.add(index).write(ptr.add(self.len).read());
            }
            Ok(removed)
        }
    }

    /// Appends clones of `slice`, growing at most once.
    pub fn extend_from_slice(&mut self, slice: &[T]) -> Result<()>
        where
            T: Clone
    {
        let required = self.len
            .checked_add(slice.len())
            .ok_or(CapacityOverflow { requested: usize::MAX })?;
        self.reserve(required)?;
        for value in slice {
            unsafe { self.write_next(value.clone()) }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(Empty)
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().first_mut().ok_or(Empty)
    }

    #[inline(always)]
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Empty)
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().last_mut().ok_or(Empty)
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len);
        self.len = 0;
        unsafe { ptr::drop_in_place(live) }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.get_unchecked(index) })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len })
        }
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { self.buf.ptr().add(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { self.buf.ptr().add(index).as_mut() }
    }

    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq
    {
        self.as_slice().contains(value)
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.buf.ptr(), self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.buf.ptr(), self.len) }
    }

    #[inline(always)]
    pub fn iter_rev(&self) -> Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    #[inline(always)]
    pub fn iter_rev_mut(&mut self) -> Rev<IterMut<'_, T>> {
        self.iter_mut().rev()
    }

    /// Writes into the first free slot.
    ///
    /// # Safety
    /// `len` must be less than `capacity`.
    #[inline(always)]
    unsafe fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe { self.buf.ptr().add(self.len).write(value) }
        self.len += 1;
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        let new_buf = RawBuf::<T>::allocate(new_capacity)?;
        let keep = self.len.min(new_capacity);
        let old: NonNull<T> = self.buf.ptr();
        if keep < self.len {
            let tail = ptr::slice_from_raw_parts_mut(
                unsafe { old.add(keep).as_ptr() },
                self.len - keep,
            );
            self.len = keep;
            unsafe { ptr::drop_in_place(tail) }
        }
        unsafe {
            old.copy_to_nonoverlapping(new_buf.ptr(), keep);
        }
        self.buf = new_buf;
        Ok(())
    }
}

impl<T, P: CapacityPolicy> Clone for GrowVec<T, P>
    where
        T: Clone,
{

    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(vec) => vec,
            Err(err) => panic!("failed to clone vector: {}", err),
        }
    }
}

impl_traits!{
    for GrowVec<T, P: CapacityPolicy>
    Drop =>

        #[inline(always)]
        fn drop(&mut self) -> () {
            self.clear()
        }
    ,
    Default =>

        #[inline(always)]
        fn default() -> Self {
            Self::empty()
        }
    ,
    Index<usize> =>

        type Output = T;

        #[inline(always)]
        fn index(&self, index: usize) -> &Self::Output {
            if index >= self.len {
                panic!("index {} out of bounds for length {}", index, self.len)
            }
            unsafe { self.get_unchecked(index) }
        }
    ,
    IndexMut<usize> =>

        #[inline(always)]
        fn index_mut(&mut self, index: usize) -> &mut Self::Output {
            if index >= self.len {
                panic!("index {} out of bounds for length {}", index, self.len)
            }
            unsafe { self.get_unchecked_mut(index) }
        }
    ,
    AsRef<[T]> =>

        #[inline(always)]
        fn as_ref(&self) -> &[T] {
            self.as_slice()
        }
    ,
    AsMut<[T]> =>

        #[inline(always)]
        fn as_mut(&mut self) -> &mut [T] {
            self.as_mut_slice()
        }
    ,
    Deref =>

        type Target = [T];

        #[inline(always)]
        fn deref(&self) -> &Self::Target {
            self.as_slice()
        }
    ,
    DerefMut =>

        #[inline(always)]
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut_slice()
        }
    ,
    IntoIterator for &'vec =>

        type Item = &'vec T;
        type IntoIter = Iter<'vec, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    ,
    IntoIterator for mut &'vec =>

        type Item = &'vec mut T;
        type IntoIter = IterMut<'vec, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.iter_mut()
        }
    ,
    PartialEq where T: PartialEq =>

        fn eq(&self, rhs: &Self) -> bool {
            self.as_slice() == rhs.as_slice()
        }
    ,
    Eq where T: Eq =>,
    Debug where T: Debug =>

        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            self.as_slice().fmt(f)
        }
    ,
    Display where T: Display =>

        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            <char as Display>::fmt(&'[', f)?;
            for (i, value) in self.iter().enumerate() {
                if i != 0 {
                    <str as Display>::fmt(", ", f)?;
                }
                value.fmt(f)?;
            }
            <char as Display>::fmt(&']', f)
        }
    ,
}
