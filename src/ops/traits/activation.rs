//! Activation operations trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::ops::Output;

/// Normalizing activations along one axis
pub trait ActivationOps {
    /// Softmax along an axis
    ///
    /// Each lane along `axis` is shifted by its maximum, exponentiated and
    /// divided by its sum, so the lane sums to 1 and adding a constant to
    /// the whole lane leaves the result unchanged.
    ///
    /// # Arguments
    ///
    /// * `input` - F16 or F32 array
    /// * `axis` - Axis to normalize over; negative values count from the end
    /// * `out` - Output with the input's shape and dtype
    fn softmax(&self, input: &DeviceArray, axis: isize, out: Output<'_>) -> Result<DeviceArray>;

    /// Log-softmax along an axis: `(x - max) - ln(sum(exp(x - max)))`
    ///
    /// Same arguments and dtypes as [`softmax`](Self::softmax).
    fn log_softmax(
        &self,
        input: &DeviceArray,
        axis: isize,
        out: Output<'_>,
    ) -> Result<DeviceArray>;
}
