//! Array operations
//!
//! This module defines the operation traits and the argument types they
//! share. [`HostClient`](crate::runtime::HostClient) implements every trait.
//!
//! # Design
//!
//! ```text
//! HostClient
//!   ├── BinaryOps          add, subtract, multiply, divide (scalar broadcasting)
//!   ├── UnaryOps           exp, log
//!   ├── ActivationOps      softmax, log_softmax
//!   ├── IndexingOps        argmax, argpartition
//!   ├── TypeConversionOps  convert, round, ceil, floor, trunc
//!   ├── ShapeOps           transpose
//!   └── RandomOps          fill_randn
//! ```
//!
//! Every op follows the same sequence: validate arguments, resolve the result
//! dtype and shape, reuse or allocate the output, then dispatch to a kernel
//! instantiated for the element type. Every check runs before the output is
//! mapped for writing, so a failed call leaves a caller-supplied output
//! untouched.

mod arithmetic;
pub(crate) mod host;
mod output;
pub mod traits;

pub use arithmetic::{BinaryOp, Operand, RoundingOp, Scalar, UnaryOp};
pub use output::Output;
pub use traits::{
    ActivationOps, BinaryOps, IndexingOps, RandomOps, ShapeOps, TypeConversionOps, UnaryOps,
};
