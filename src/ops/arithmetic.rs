//! Operation kinds and operand types shared by the op traits

use crate::array::DeviceArray;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::RoundingMode;

/// Binary arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
}

impl BinaryOp {
    /// Operator name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "subtract",
            Self::Mul => "multiply",
            Self::Div => "divide",
        }
    }
}

/// Elementwise transcendental operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Exponential: e^a
    Exp,
    /// Natural logarithm: ln(a)
    Log,
}

impl UnaryOp {
    /// Operator name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Log => "log",
        }
    }
}

/// Rounding rule applied by a rounding conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingOp {
    /// Nearest integer, ties per [`RoundingMode`]
    Round,
    /// Smallest integer not below the value
    Ceil,
    /// Largest integer not above the value
    Floor,
    /// Integer part, rounding toward zero
    Trunc,
}

impl RoundingOp {
    /// Operator name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Trunc => "trunc",
        }
    }

    /// Apply the rule to a value; `mode` only affects ties of `Round`
    #[inline]
    pub fn apply(self, x: f64, mode: RoundingMode) -> f64 {
        match self {
            Self::Round => mode.apply(x),
            Self::Ceil => x.ceil(),
            Self::Floor => x.floor(),
            Self::Trunc => x.trunc(),
        }
    }
}

// ============================================================================
// Operands
// ============================================================================

/// Host scalar operand of a binary op
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point
    Float(f64),
}

impl Scalar {
    /// Convert to the element type of `T`
    ///
    /// Integer values must fit the range of an integer dtype; floats are
    /// rejected for integer dtypes. Float dtypes accept any scalar, encoding
    /// through f64.
    pub(crate) fn to_element<T: Element>(self) -> Result<T> {
        let dtype = T::DTYPE;
        match self {
            Self::Float(v) => {
                if dtype.is_int() {
                    return Err(Error::invalid_argument(
                        "scalar",
                        format!("float scalar {v} cannot be used with {dtype} operands"),
                    ));
                }
                Ok(T::from_f64(v))
            }
            Self::Int(v) => int_to_element(v as i128, dtype),
            Self::UInt(v) => int_to_element(v as i128, dtype),
        }
    }
}

fn int_to_element<T: Element>(v: i128, dtype: DType) -> Result<T> {
    match dtype.int_bounds() {
        Some((lo, hi)) if v < lo || v > hi => Err(Error::invalid_argument(
            "scalar",
            format!("{v} is out of range for {dtype}"),
        )),
        Some(_) => Ok(T::from_i128(v)),
        None => Ok(T::from_f64(v as f64)),
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident, $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$wide>::from(v))
                }
            }

            impl From<$ty> for Operand<'_> {
                fn from(v: $ty) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

impl_scalar_from!(Int, i64: i8, i16, i32, i64);
impl_scalar_from!(UInt, u64: u8, u16, u32, u64);
impl_scalar_from!(Float, f64: f32, f64);

/// One side of a binary op: an array or a host scalar
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Array operand
    Array(&'a DeviceArray),
    /// Scalar broadcast against the other operand
    Scalar(Scalar),
}

impl<'a> Operand<'a> {
    /// The array, if this operand is one
    pub fn array(&self) -> Option<&'a DeviceArray> {
        match self {
            Self::Array(array) => Some(array),
            Self::Scalar(_) => None,
        }
    }

    /// Dtype taking part in promotion; scalars have none
    pub fn dtype(&self) -> Option<DType> {
        self.array().map(DeviceArray::dtype)
    }
}

impl<'a> From<&'a DeviceArray> for Operand<'a> {
    fn from(array: &'a DeviceArray) -> Self {
        Self::Array(array)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}
