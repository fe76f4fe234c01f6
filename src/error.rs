//! Error types for hostops
//!
//! Every failure the engine reports is an invalid-argument condition detected
//! before any output buffer is written. The variants only refine which argument
//! was wrong; [`Error::is_invalid_argument`] holds for all of them.

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using hostops' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hostops operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Axis outside `[-ndim, ndim)`
    #[error("Invalid axis {dim} for array with {ndim} dimensions")]
    InvalidDimension {
        /// The requested axis
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype({dtype}) for operator {op}")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// A dtype other than the one the operation requires
    #[error("DType mismatch for '{arg}': expected {expected}, got {got}")]
    DTypeMismatch {
        /// The argument name
        arg: &'static str,
        /// Required dtype
        expected: DType,
        /// Supplied dtype
        got: DType,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Data movement needs whole 1, 2, 4 or 8 byte cells
    #[error("Operator {op} requires a byte-aligned dtype, got {dtype}")]
    NotByteAligned {
        /// The offending dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(arg: &'static str, expected: DType, got: DType) -> Self {
        Self::DTypeMismatch { arg, expected, got }
    }

    /// Whether this error is an invalid-argument condition
    ///
    /// Always true: the engine has a single error kind.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::InvalidArgument { .. }
            | Self::InvalidDimension { .. }
            | Self::UnsupportedDType { .. }
            | Self::DTypeMismatch { .. }
            | Self::ShapeMismatch { .. }
            | Self::NotByteAligned { .. } => true,
        }
    }
}
