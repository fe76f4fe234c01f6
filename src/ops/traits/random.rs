//! Random fill operations trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::random::RandomGenerator;

/// In-place random fills
pub trait RandomOps {
    /// Fill `out` with samples from the standard normal distribution N(0, 1)
    ///
    /// Draws from `generator` when given, else from the process-wide
    /// default generator. Supported dtypes: FP8E4M3FN, FP8E4M3FNUZ, BF16,
    /// F16, F32.
    fn fill_randn(
        &self,
        out: &DeviceArray,
        generator: Option<&mut RandomGenerator>,
    ) -> Result<()>;
}
