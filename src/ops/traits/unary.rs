//! Unary operations trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::ops::Output;

/// Element-wise unary operations
///
/// The result has the input's shape and dtype; a caller `out` must match
/// both. Supported dtypes: FP8E4M3FN, FP8E4M3FNUZ, BF16, F16, F32.
pub trait UnaryOps {
    /// Exponential: e^x
    fn exp(&self, input: &DeviceArray, out: Output<'_>) -> Result<DeviceArray>;

    /// Natural logarithm: ln(x)
    fn log(&self, input: &DeviceArray, out: Output<'_>) -> Result<DeviceArray>;
}
