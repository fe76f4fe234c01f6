//! Index-producing reductions trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::ops::Output;

/// Operations returning I64 positions along an axis
pub trait IndexingOps {
    /// Index of the maximum along `axis`
    ///
    /// Ties resolve to the lowest index. The result is I64 with `axis`
    /// removed, or kept with size 1 when `keepdims` is set. A caller `out`
    /// must be I64 and may have either of those two shapes.
    ///
    /// # Arguments
    ///
    /// * `input` - FP8E4M3FN, FP8E4M3FNUZ, BF16, F16 or F32 array
    /// * `axis` - Axis to reduce; negative values count from the end
    /// * `keepdims` - Reinsert the reduced axis with size 1
    /// * `out` - Output for the indices
    fn argmax(
        &self,
        input: &DeviceArray,
        axis: isize,
        keepdims: bool,
        out: Output<'_>,
    ) -> Result<DeviceArray>;

    /// Indices that partition each lane along `axis` around its k-th smallest value
    ///
    /// Positions before `k` hold the indices of the `k` smallest values in
    /// unspecified order, position `k` the k-th smallest and the rest larger
    /// values. A negative `k` counts from the end of the axis, so `k = -n`
    /// places the `n` largest values last.
    ///
    /// The result is I64 with the input's shape.
    fn argpartition(
        &self,
        input: &DeviceArray,
        k: isize,
        axis: isize,
        out: Output<'_>,
    ) -> Result<DeviceArray>;
}
