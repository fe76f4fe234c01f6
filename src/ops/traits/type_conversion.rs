//! Type conversion operations trait.

use crate::array::DeviceArray;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::Output;

/// Type conversion operations
///
/// Every method resolves the target dtype the same way: `dtype` if given,
/// else the dtype of a caller `out`, else the input's dtype. Giving both
/// with different dtypes is an error.
pub trait TypeConversionOps {
    /// Static numeric cast to the target dtype
    ///
    /// # Supported Conversions
    ///
    /// Any pairing of F64, F32, F16, BF16, FP8E4M3FN, FP8E4M3FNUZ and the
    /// 8 to 64 bit integers.
    ///
    /// - **Int→Int**: keeps the low bits
    /// - **Float→Int**: truncates toward zero, saturates, NaN becomes 0
    /// - **To narrow floats**: BF16 truncates, FP8 rounds to nearest even and saturates
    fn convert(
        &self,
        input: &DeviceArray,
        dtype: Option<DType>,
        out: Output<'_>,
    ) -> Result<DeviceArray>;

    /// Round to nearest, then cast
    ///
    /// Ties follow the client's [`RoundingMode`](crate::runtime::RoundingMode),
    /// half away from zero by default. The input must be a float dtype; the
    /// target must be the input dtype or an 8 to 32 bit integer.
    fn round(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>)
    -> Result<DeviceArray>;

    /// Round toward positive infinity, then cast
    fn ceil(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>)
    -> Result<DeviceArray>;

    /// Round toward negative infinity, then cast
    fn floor(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>)
    -> Result<DeviceArray>;

    /// Round toward zero, then cast
    fn trunc(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>)
    -> Result<DeviceArray>;
}
