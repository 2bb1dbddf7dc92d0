/*!

A growable contiguous array that allocates, constructs and releases its own
storage instead of wrapping `Vec`.

`DynamicArray<T>` keeps allocated capacity separate from the number of
constructed elements, grows by half again its size when an append finds it
full, and never leaves a half-moved buffer behind when an allocation fails.
`FixedArray<T, N>` is its inline, fixed-size sibling with the same access and
comparison contract.

Enable the `logging` feature to see reallocations through the `log` crate.

*/

#[macro_use]
mod logging;
mod error;
mod raw;
mod growth;
mod guard;
mod dyn_array;
mod fixed_array;
mod cmp;

pub use error::ArrayError;
pub use dyn_array::DynamicArray;
pub use fixed_array::FixedArray;
pub use growth::grown_capacity;
pub use cmp::{compare, compare_total, equal};

#[cfg(test)]
pub mod dropflag;
