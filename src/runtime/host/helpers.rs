//! Helper functions for host array operations
//!
//! Shared validation, output allocation-or-reuse, and the dtype dispatch
//! macros used by every op in `crate::ops::host`.

use super::HostClient;
use crate::array::DeviceArray;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::Output;

// ============================================================================
// DType Dispatch Macros
// ============================================================================

/// Macro for dtype dispatch to typed kernel calls
///
/// Checks `$dtype` against the op's supported `DTypeSet`, then matches on it
/// and evaluates the block with `$T` bound to the element type.
/// Usage: `dispatch_dtype!(dtype, SUPPORTED, T => { code using T }, "op_name")`
///
/// The block must evaluate to a `Result`. A dtype outside the set, or one
/// without an element type (I4, U4, Bool, complex), returns
/// `UnsupportedDType` from the enclosing function.
macro_rules! dispatch_dtype {
    ($dtype:expr, $supported:expr, $T:ident => $body:block, $error_op:expr) => {{
        let dtype: $crate::dtype::DType = $dtype;
        if !$supported.contains(dtype) {
            return Err($crate::error::Error::unsupported_dtype(dtype, $error_op));
        }
        match dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                type $T = half::f16;
                $body
            }
            $crate::dtype::DType::BF16 => {
                type $T = $crate::dtype::BF16;
                $body
            }
            $crate::dtype::DType::FP8E4M3FN => {
                type $T = $crate::dtype::FP8E4M3FN;
                $body
            }
            $crate::dtype::DType::FP8E4M3FNUZ => {
                type $T = $crate::dtype::FP8E4M3FNUZ;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
            $crate::dtype::DType::I16 => {
                type $T = i16;
                $body
            }
            $crate::dtype::DType::I8 => {
                type $T = i8;
                $body
            }
            $crate::dtype::DType::U64 => {
                type $T = u64;
                $body
            }
            $crate::dtype::DType::U32 => {
                type $T = u32;
                $body
            }
            $crate::dtype::DType::U16 => {
                type $T = u16;
                $body
            }
            $crate::dtype::DType::U8 => {
                type $T = u8;
                $body
            }
            _ => return Err($crate::error::Error::unsupported_dtype(dtype, $error_op)),
        }
    }};
}

/// Macro for dispatch on element width only
///
/// Data movement treats elements as opaque cells, so any byte-aligned dtype
/// maps onto the unsigned integer of the same width.
/// Usage: `dispatch_cell!(dtype, C => { code using C }, "op_name")`
macro_rules! dispatch_cell {
    ($dtype:expr, $C:ident => $body:block, $error_op:expr) => {{
        let dtype: $crate::dtype::DType = $dtype;
        if !dtype.is_byte_aligned() {
            return Err($crate::error::Error::NotByteAligned {
                dtype,
                op: $error_op,
            });
        }
        match dtype.size_in_bytes() {
            1 => {
                type $C = u8;
                $body
            }
            2 => {
                type $C = u16;
                $body
            }
            4 => {
                type $C = u32;
                $body
            }
            8 => {
                type $C = u64;
                $body
            }
            _ => {
                return Err($crate::error::Error::NotByteAligned {
                    dtype,
                    op: $error_op,
                })
            }
        }
    }};
}

pub(crate) use dispatch_cell;
pub(crate) use dispatch_dtype;

// ============================================================================
// Validation
// ============================================================================

/// Normalize an axis, wrapping negative values from the end
pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let idx = if axis < 0 { axis + ndim as isize } else { axis };
    if idx < 0 || idx as usize >= ndim {
        return Err(Error::InvalidDimension { dim: axis, ndim });
    }
    Ok(idx as usize)
}

/// Fail unless a caller `out` has dtype `expected`
pub(crate) fn check_out_dtype(out: &Output<'_>, expected: DType) -> Result<()> {
    match out.array() {
        Some(array) if array.dtype() != expected => {
            Err(Error::dtype_mismatch("out", expected, array.dtype()))
        }
        _ => Ok(()),
    }
}

/// Fail unless a caller `out` has shape `expected`
pub(crate) fn check_out_shape(out: &Output<'_>, expected: &[usize]) -> Result<()> {
    match out.array() {
        Some(array) if array.shape() != expected => {
            Err(Error::shape_mismatch(expected, array.shape()))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Output Allocation
// ============================================================================

/// Reuse the caller's `out` or allocate a fresh host array
///
/// Validates shape and dtype of a caller `out` first, so nothing is
/// allocated or written for a call that will fail.
pub(crate) fn prepare_output(
    client: &HostClient,
    out: &Output<'_>,
    shape: &[usize],
    dtype: DType,
) -> Result<DeviceArray> {
    check_out_dtype(out, dtype)?;
    check_out_shape(out, shape)?;
    Ok(match out.array() {
        Some(array) => array.clone(),
        None => {
            tracing::trace!(
                "allocating output {shape:?} x {dtype} (device_visible={})",
                out.is_device_visible()
            );
            DeviceArray::for_host(client.device(), shape, dtype, out.is_device_visible())
        }
    })
}

/// Input handle that is safe to read while `out` is mapped for writing
///
/// When both live in the same storage the input is snapshotted, otherwise
/// the handle is shared.
pub(crate) fn detach_input(input: &DeviceArray, out: &DeviceArray) -> DeviceArray {
    if input.shares_storage(out) {
        tracing::trace!("out aliases an input; snapshotting {input}");
        input.deep_copy()
    } else {
        input.clone()
    }
}

// ============================================================================
// Kernel Tracing
// ============================================================================

/// Span guard held for the duration of one kernel dispatch
pub(crate) struct KernelSpan {
    #[cfg(feature = "trace-kernels")]
    _entered: tracing::span::EnteredSpan,
}

/// Enter the per-kernel trace span (no-op without the `trace-kernels` feature)
#[inline]
pub(crate) fn enter_kernel(op: &'static str, dtype: DType) -> KernelSpan {
    #[cfg(feature = "trace-kernels")]
    {
        KernelSpan {
            _entered: tracing::trace_span!("kernel", op, dtype = %dtype).entered(),
        }
    }
    #[cfg(not(feature = "trace-kernels"))]
    {
        let _ = (op, dtype);
        KernelSpan {}
    }
}
