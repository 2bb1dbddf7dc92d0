use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors reported by `DynamicArray` and `FixedArray` operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Checked access past the constructed length.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the access.
        len: usize,
    },
    /// `pop_back` on an array with no elements.
    EmptyPop,
    /// The requested capacity does not fit in the address space.
    CapacityOverflow {
        /// Requested number of slots.
        requested: usize,
    },
    /// The global allocator returned null.
    AllocFailed {
        /// Layout of the failed request.
        layout: Layout,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            ArrayError::EmptyPop => write!(f, "pop_back on an empty array"),
            ArrayError::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {} slots requested", requested)
            }
            ArrayError::AllocFailed { layout } => write!(
                f,
                "allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl Error for ArrayError {}
