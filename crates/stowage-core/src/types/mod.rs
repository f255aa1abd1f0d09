//! Scalar domain types with validated construction.

mod address;
mod character;
mod fixed_point;
mod wide_int;

pub use address::*;
pub use character::*;
pub use fixed_point::*;
pub use wide_int::*;
