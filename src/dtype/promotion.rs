//! Type promotion for mixed-dtype arithmetic
//!
//! Dtypes are ranked by category first (bool < integer < float < complex) and
//! by bit width within a category. Mixing a signed and an unsigned integer
//! widens to the next signed integer so that both value ranges fit, saturating
//! at 64 bits rather than leaving the integer category.

use super::DType;
use crate::error::{Error, Result};

/// Promotion rank of a dtype: category weight plus bit count
#[inline]
pub const fn promotion_rank(dtype: DType) -> u32 {
    dtype.category().promotion_weight() + dtype.bit_count() as u32
}

/// Determine the dtype an elementwise operation computes in
///
/// `None` marks a host scalar operand, which conforms to the other side. At
/// least one side must be an array dtype. On equal rank the left-hand dtype
/// wins.
///
/// # Examples
///
/// ```
/// use hostops::dtype::{DType, promote};
///
/// assert_eq!(promote(Some(DType::U8), Some(DType::I8)).unwrap(), DType::I16);
/// assert_eq!(promote(Some(DType::F32), Some(DType::I8)).unwrap(), DType::F32);
/// assert_eq!(promote(None, Some(DType::F16)).unwrap(), DType::F16);
/// assert!(promote(None, None).is_err());
/// ```
pub fn promote(lhs: Option<DType>, rhs: Option<DType>) -> Result<DType> {
    let (lhs, rhs) = match (lhs, rhs) {
        (None, None) => {
            return Err(Error::invalid_argument(
                "lhs",
                "elementwise operations require at least one array operand",
            ));
        }
        (Some(dtype), None) | (None, Some(dtype)) => return Ok(dtype),
        (Some(lhs), Some(rhs)) => (lhs, rhs),
    };

    let promoted = if promotion_rank(lhs) < promotion_rank(rhs) {
        rhs
    } else {
        lhs
    };

    // Signed/unsigned mismatch between two integers: step up to a signed type
    // that holds both. Bool is not an integer operand here.
    if lhs.is_int() && rhs.is_int() && lhs.is_unsigned_int() != rhs.is_unsigned_int() {
        return Ok(match promoted {
            DType::U8 | DType::I8 => DType::I16,
            DType::U16 | DType::I16 => DType::I32,
            _ => DType::I64,
        });
    }

    Ok(promoted)
}
