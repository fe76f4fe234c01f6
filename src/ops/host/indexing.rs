//! Host implementation of indexing operations.

use crate::array::DeviceArray;
use crate::dtype::{DType, DTypeSet, Element};
use crate::error::{Error, Result};
use crate::ops::{IndexingOps, Output};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{
    check_out_dtype, dispatch_dtype, enter_kernel, normalize_axis, prepare_output,
};
use crate::runtime::host::kernels;

/// Dtypes argmax and argpartition are instantiated for
const INDEXING_DTYPES: DTypeSet = DTypeSet::REDUCED_FLOATS;

impl IndexingOps for HostClient {
    fn argmax(
        &self,
        input: &DeviceArray,
        axis: isize,
        keepdims: bool,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        let dtype = input.dtype();
        tracing::debug!("argmax: {input} axis={axis} keepdims={keepdims}");

        let axis_idx = normalize_axis(axis, input.ndim())?;
        check_out_dtype(&out, DType::I64)?;
        if !INDEXING_DTYPES.contains(dtype) {
            return Err(Error::unsupported_dtype(dtype, "argmax"));
        }

        let (outer_size, reduce_size, inner_size) = input.layout().lanes(axis_idx);
        if reduce_size == 0 {
            return Err(Error::invalid_argument(
                "axis",
                format!("argmax over axis {axis_idx} of length 0"),
            ));
        }

        let mut reduced_shape = input.shape().to_vec();
        reduced_shape.remove(axis_idx);

        // A caller out may already carry the kept unit axis
        let result = match out.array() {
            Some(array) if array.ndim() == input.ndim() => {
                let mut kept_shape = input.shape().to_vec();
                kept_shape[axis_idx] = 1;
                prepare_output(self, &out, &kept_shape, DType::I64)?
            }
            _ => prepare_output(self, &out, &reduced_shape, DType::I64)?,
        };

        {
            let _span = enter_kernel("argmax", dtype);
            dispatch_dtype!(dtype, INDEXING_DTYPES, T => {
                argmax_typed::<T>(input, &result, outer_size, reduce_size, inner_size)
            }, "argmax")?;
        }

        let is_kept = result.ndim() == input.ndim();
        match (keepdims, is_kept) {
            (true, false) => result.expand_dims(axis_idx as isize),
            (false, true) => result.with_shape(&reduced_shape),
            _ => Ok(result),
        }
    }

    fn argpartition(
        &self,
        input: &DeviceArray,
        k: isize,
        axis: isize,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        let dtype = input.dtype();
        tracing::debug!("argpartition: {input} k={k} axis={axis}");

        let axis_idx = normalize_axis(axis, input.ndim())?;
        let (outer_size, dim_size, inner_size) = input.layout().lanes(axis_idx);

        // Negative k counts from the end of the axis
        let len = dim_size as isize;
        let k_idx = if k < 0 { k + len } else { k };
        if k_idx < 0 || k_idx >= len {
            return Err(Error::invalid_argument(
                "k",
                format!("must be in [-{len}, {len}) but got {k}"),
            ));
        }

        check_out_dtype(&out, DType::I64)?;
        if !INDEXING_DTYPES.contains(dtype) {
            return Err(Error::unsupported_dtype(dtype, "argpartition"));
        }
        let result = prepare_output(self, &out, input.shape(), DType::I64)?;

        let _span = enter_kernel("argpartition", dtype);
        dispatch_dtype!(dtype, INDEXING_DTYPES, T => {
            let in_map = input.map_read();
            let mut out_map = result.map_write();
            let src = in_map.view::<T>()?;
            let mut dst = out_map.view_mut::<i64>()?;
            kernels::argpartition_kernel(
                src.as_slice(),
                dst.as_mut_slice(),
                outer_size,
                dim_size,
                inner_size,
                k_idx as usize,
            );
            Ok(())
        }, "argpartition")?;

        Ok(result)
    }
}

fn argmax_typed<T: Element>(
    input: &DeviceArray,
    out: &DeviceArray,
    outer_size: usize,
    reduce_size: usize,
    inner_size: usize,
) -> Result<()> {
    let in_map = input.map_read();
    let mut out_map = out.map_write();
    let src = in_map.view::<T>()?;
    let mut dst = out_map.view_mut::<i64>()?;
    kernels::argmax_kernel(
        src.as_slice(),
        dst.as_mut_slice(),
        outer_size,
        reduce_size,
        inner_size,
    );
    Ok(())
}
