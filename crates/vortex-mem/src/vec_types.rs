mod iter;
mod grow_vec;
mod stack_array;

pub use iter::{IterBase, Iter, IterMut};
pub use grow_vec::{GrowVec, FixedVec, INITIAL_CAPACITY};
pub use stack_array::StackArray;
