//! Shape operations trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::ops::Output;

/// Data movement operations
pub trait ShapeOps {
    /// Reorder the axes of an array
    ///
    /// Axis `i` of the result is axis `permutation[i]` of the input.
    /// Elements are moved as opaque cells, so any dtype with a 1, 2, 4 or
    /// 8 byte width is accepted.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - `permutation` is not a permutation of the axes
    /// * `NotByteAligned` - I4, U4 or a 16-byte dtype
    fn transpose(
        &self,
        input: &DeviceArray,
        permutation: &[usize],
        out: Output<'_>,
    ) -> Result<DeviceArray>;
}
