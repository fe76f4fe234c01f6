//! Host implementations of the op traits

mod activation;
mod binary;
mod indexing;
mod random;
mod shape;
mod type_conversion;
mod unary;
