use std::fmt;

/// Failure of a [`DynamicArray`](crate::DynamicArray) operation.
///
/// Every variant leaves the array exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// A construction asked for zero slots.
    ZeroCapacity,
    /// The requested capacity does not fit in `usize` or in a valid `Layout`.
    CapacityOverflow,
    /// The allocator returned null while trying to provide `capacity` slots.
    AllocationFailed { capacity: usize },
    /// `index` is outside the range the operation accepts for an array of `len` elements.
    IndexOutOfRange { index: usize, len: usize },
    /// `count` elements starting at `index` do not fit inside `len`.
    RangeOutOfBounds { index: usize, count: usize, len: usize },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::ZeroCapacity => write!(f, "capacity must be at least 1"),
            ArrayError::CapacityOverflow => write!(f, "capacity overflow"),
            ArrayError::AllocationFailed { capacity } => {
                write!(f, "failed to allocate memory for {} elements", capacity)
            }
            ArrayError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            ArrayError::RangeOutOfBounds { index, count, len } => write!(
                f,
                "range of {} elements at index {} out of bounds for length {}",
                count, index, len
            ),
        }
    }
}

impl std::error::Error for ArrayError {}
