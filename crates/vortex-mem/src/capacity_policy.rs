//! Growth strategies selected through the `P` parameter of [`GrowVec`].
//!
//! [`GrowVec`]: crate::GrowVec

pub trait CapacityPolicy {

    fn can_grow() -> bool;

    /// Returns the capacity to reallocate to when `required` slots are needed
    /// and only `current` are allocated, or `None` if the policy refuses.
    fn grow(current: usize, required: usize) -> Option<usize>;
}

/// Doubles the capacity on growth. A zero capacity grows to 2.
pub struct Doubling {}

impl CapacityPolicy for Doubling {

    #[inline]
    fn can_grow() -> bool {
        true
    }

    #[inline]
    fn grow(current: usize, required: usize) -> Option<usize> {
        if required <= current { None }
        else { Some(current.max(1).saturating_mul(2).max(required)) }
    }
}

/// Never grows implicitly. Capacity only changes through an explicit
/// [`GrowVec::resize`](crate::GrowVec::resize).
pub struct Fixed {}

impl CapacityPolicy for Fixed {

    #[inline]
    fn can_grow() -> bool {
        false
    }

    #[inline]
    fn grow(_: usize, _: usize) -> Option<usize> {
        None
    }
}
