//! Host kernel implementations
//!
//! Kernels are generic over the element type and operate on the row-major
//! slices of mapped array views. Validation happens in the op layer before a
//! kernel runs, so kernels assume consistent lengths and extents.

pub mod binary;
pub mod memory;
pub mod reduce;
pub mod shape;
pub mod sort;
pub mod unary;

pub use binary::{BinaryInput, binary_op_kernel};
pub use memory::{cast_kernel, randn_kernel, rounding_cast_kernel};
pub use reduce::{argmax_kernel, log_softmax_kernel, softmax_kernel};
pub use shape::permute_kernel;
pub use sort::argpartition_kernel;
pub use unary::unary_op_kernel;
