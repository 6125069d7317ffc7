//! Contiguous and linked containers with explicit, recoverable failure modes.
//!
//! [`GrowVec`] is the core type: a growable array whose every fallible
//! operation reports a [`VecError`] instead of aborting. [`StackArray`],
//! [`HashTable`] and [`LinkedList`] are built around it.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod macros;

pub mod capacity_policy;
pub mod conditional;
pub mod vec_types;
pub mod hash_table;
pub mod linked_list;

mod errors;
mod raw_buf;

pub use errors::VecError;
pub use capacity_policy::CapacityPolicy;
pub use vec_types::{GrowVec, FixedVec, StackArray, Iter, IterMut, INITIAL_CAPACITY};
pub use hash_table::HashTable;
pub use linked_list::LinkedList;

pub type Result<T> = core::result::Result<T, VecError>;
