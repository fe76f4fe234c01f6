//! Host implementation of type conversion operations.

use crate::array::DeviceArray;
use crate::dtype::{DType, DTypeSet, Element};
use crate::error::{Error, Result};
use crate::ops::{Output, RoundingOp, TypeConversionOps};
use crate::runtime::host::helpers::{detach_input, dispatch_dtype, enter_kernel, prepare_output};
use crate::runtime::host::kernels;
use crate::runtime::{HostClient, RoundingMode};

/// Dtypes `convert` casts between
const CONVERT_DTYPES: DTypeSet = DTypeSet::NUMERIC;

/// Inputs accepted by the rounding conversions
const ROUNDING_INPUTS: DTypeSet = DTypeSet::FLOATS;

/// Integer targets of the rounding conversions, besides the input dtype
const ROUNDING_TARGETS: DTypeSet = DTypeSet::single(DType::U8)
    .with(DType::I8)
    .with(DType::U16)
    .with(DType::I16)
    .with(DType::U32)
    .with(DType::I32);

impl TypeConversionOps for HostClient {
    fn convert(
        &self,
        input: &DeviceArray,
        dtype: Option<DType>,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        convert_impl(self, input, dtype, out, None)
    }

    fn round(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>) -> Result<DeviceArray> {
        convert_impl(self, input, dtype, out, Some(RoundingOp::Round))
    }

    fn ceil(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>) -> Result<DeviceArray> {
        convert_impl(self, input, dtype, out, Some(RoundingOp::Ceil))
    }

    fn floor(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>) -> Result<DeviceArray> {
        convert_impl(self, input, dtype, out, Some(RoundingOp::Floor))
    }

    fn trunc(&self, input: &DeviceArray, dtype: Option<DType>, out: Output<'_>) -> Result<DeviceArray> {
        convert_impl(self, input, dtype, out, Some(RoundingOp::Trunc))
    }
}

/// Target dtype: explicit `dtype`, else the caller out's, else the input's
fn resolve_target(input: &DeviceArray, dtype: Option<DType>, out: &Output<'_>) -> Result<DType> {
    match (dtype, out.array()) {
        (Some(dtype), Some(array)) if array.dtype() != dtype => {
            Err(Error::dtype_mismatch("out", dtype, array.dtype()))
        }
        (Some(dtype), _) => Ok(dtype),
        (None, Some(array)) => Ok(array.dtype()),
        (None, None) => Ok(input.dtype()),
    }
}

fn convert_impl(
    client: &HostClient,
    input: &DeviceArray,
    dtype: Option<DType>,
    out: Output<'_>,
    rounding: Option<RoundingOp>,
) -> Result<DeviceArray> {
    let src_dtype = input.dtype();
    let op_name = rounding.map_or("convert", RoundingOp::name);
    let target = resolve_target(input, dtype, &out)?;
    tracing::debug!("{op_name}: {input} -> {target}");

    let (sources, targets) = match rounding {
        None => (CONVERT_DTYPES, CONVERT_DTYPES),
        Some(_) => {
            if !ROUNDING_INPUTS.contains(src_dtype) {
                return Err(Error::unsupported_dtype(src_dtype, op_name));
            }
            let targets = ROUNDING_TARGETS.with(src_dtype);
            if !targets.contains(target) {
                return Err(Error::invalid_argument(
                    "dtype",
                    format!(
                        "{op_name} of {src_dtype} produces {src_dtype} or an 8 to 32 bit integer, not {target}"
                    ),
                ));
            }
            (ROUNDING_INPUTS, targets)
        }
    };
    if !sources.contains(src_dtype) {
        return Err(Error::unsupported_dtype(src_dtype, op_name));
    }
    if !targets.contains(target) {
        return Err(Error::unsupported_dtype(target, op_name));
    }

    let result = prepare_output(client, &out, input.shape(), target)?;
    let source = detach_input(input, &result);
    let mode = client.config().rounding;

    let _span = enter_kernel(op_name, src_dtype);
    dispatch_dtype!(src_dtype, sources, S => {
        dispatch_dtype!(target, targets, D => {
            convert_typed::<S, D>(rounding, mode, &source, &result)
        }, op_name)
    }, op_name)?;

    Ok(result)
}

fn convert_typed<S: Element, D: Element>(
    rounding: Option<RoundingOp>,
    mode: RoundingMode,
    input: &DeviceArray,
    out: &DeviceArray,
) -> Result<()> {
    let in_map = input.map_read();
    let mut out_map = out.map_write();
    let src = in_map.view::<S>()?;
    let mut dst = out_map.view_mut::<D>()?;
    match rounding {
        Some(op) => kernels::rounding_cast_kernel(op, mode, src.as_slice(), dst.as_mut_slice()),
        None => kernels::cast_kernel(src.as_slice(), dst.as_mut_slice()),
    }
    Ok(())
}
