//! # hostops
//!
//! **Host-side array operations for device arrays mapped into CPU memory.**
//!
//! hostops runs argmax, argpartition, softmax, elementwise math, dtype
//! conversion, transpose and random fills over a typed buffer plus a shape.
//! The engine picks a monomorphized kernel from the runtime dtype and
//! validates every argument before it writes a single output element.
//!
//! ## Features
//!
//! - **Narrow floats**: bf16, fp8 e4m3fn and fp8 e4m3fnuz as first-class dtypes
//! - **Promotion**: a deterministic common dtype for mixed-dtype arithmetic
//! - **Scalars**: binary ops take an array and a host scalar on either side
//! - **Output reuse**: any op may write into a caller supplied array, in place
//! - **Reproducible randomness**: independently seeded generators
//!
//! ## Quick Start
//!
//! ```
//! use hostops::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let client = HostClient::new();
//! let logits = DeviceArray::from_slice(&[1.0f32, 3.0, 2.0], &[3], client.device())?;
//!
//! let probs = client.softmax(&logits, -1, Output::new())?;
//! let best = client.argmax(&probs, -1, false, Output::new())?;
//! assert_eq!(best.to_vec::<i64>()?, vec![1]);
//!
//! let shifted = client.add(&logits, 1.0f32, Output::new())?;
//! assert_eq!(shifted.to_vec::<f32>()?, vec![2.0, 4.0, 3.0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `trace-kernels`: open a `tracing` span around every kernel invocation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod random;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{DeviceArray, Layout};
    pub use crate::dtype::{BF16, DType, FP8E4M3FN, FP8E4M3FNUZ};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        ActivationOps, BinaryOps, IndexingOps, Operand, Output, RandomOps, Scalar, ShapeOps,
        TypeConversionOps, UnaryOps,
    };
    pub use crate::random::RandomGenerator;
    pub use crate::runtime::{HostClient, HostConfig, HostDevice, RoundingMode};
}
