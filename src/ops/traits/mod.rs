//! Operation traits for array operations.
//!
//! This module contains the trait definitions; the host implementations live
//! in `ops/host/`.

mod activation;
mod binary;
mod indexing;
mod random;
mod shape;
mod type_conversion;
mod unary;

pub use activation::ActivationOps;
pub use binary::BinaryOps;
pub use indexing::IndexingOps;
pub use random::RandomOps;
pub use shape::ShapeOps;
pub use type_conversion::TypeConversionOps;
pub use unary::UnaryOps;
