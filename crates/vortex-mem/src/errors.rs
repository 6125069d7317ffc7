use core::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VecError {
    Empty,
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    CapacityOverflow {
        requested: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    FixedCapacity {
        capacity: usize,
    },
}

impl Display for VecError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                write!(f, "container was empty")
            },
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {} was out of bounds of len {}", index, len)
            },
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity {} overflows the address space", requested)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::FixedCapacity { capacity } => {
                write!(f, "exceeded fixed capacity of {}", capacity)
            },
        }
    }
}

impl core::error::Error for VecError {}
