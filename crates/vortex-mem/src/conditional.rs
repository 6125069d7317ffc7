//! Type-level booleans used to share one implementation between shared and
//! mutable variants of a type.
//!
//! [`True`] takes an optional marker type, so a `True<&'a mut T>` makes the
//! type using it invariant over `T` while `False` keeps it covariant.

use core::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

pub trait Conditional: sealed::Sealed {
    const VALUE: bool;
}

pub struct True<M: ?Sized = ()>(PhantomData<M>);

pub struct False;

impl<M: ?Sized> sealed::Sealed for True<M> {}

impl sealed::Sealed for False {}

impl<M: ?Sized> Conditional for True<M> {
    const VALUE: bool = true;
}

impl Conditional for False {
    const VALUE: bool = false;
}
