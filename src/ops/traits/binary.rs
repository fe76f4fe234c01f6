//! Binary arithmetic operations trait.

use crate::array::DeviceArray;
use crate::error::Result;
use crate::ops::{Operand, Output};

/// Element-wise binary arithmetic with scalar broadcasting
///
/// Each operand is an array or a host [`Scalar`](crate::ops::Scalar); at
/// least one must be an array. Two arrays must have identical shapes. The
/// result dtype is [`promote`](crate::dtype::promote) of the array dtypes,
/// and array operands of another dtype are converted first.
///
/// Integer results wrap on overflow.
///
/// # Example
///
/// ```
/// use hostops::prelude::*;
///
/// let client = HostClient::new();
/// let a = DeviceArray::from_slice(&[1u8, 2, 3], &[3], client.device()).unwrap();
/// let b = DeviceArray::from_slice(&[-1i8, -2, -3], &[3], client.device()).unwrap();
///
/// let sum = client.add(&a, &b, Output::new()).unwrap();
/// assert_eq!(sum.dtype(), DType::I16);
/// assert_eq!(sum.to_vec::<i16>().unwrap(), vec![0, 0, 0]);
///
/// let scaled = client.multiply(&a, 2u8, Output::new()).unwrap();
/// assert_eq!(scaled.to_vec::<u8>().unwrap(), vec![2, 4, 6]);
/// ```
pub trait BinaryOps {
    /// Element-wise addition: lhs + rhs
    fn add<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray>;

    /// Element-wise subtraction: lhs - rhs
    fn subtract<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray>;

    /// Element-wise multiplication: lhs * rhs
    fn multiply<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray>;

    /// Element-wise division: lhs / rhs
    ///
    /// Integer division truncates toward zero; a zero integer divisor is
    /// rejected before anything is written.
    fn divide<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray>;
}
