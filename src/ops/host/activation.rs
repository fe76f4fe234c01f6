//! Host implementation of activation operations.

use crate::array::DeviceArray;
use crate::dtype::{DType, DTypeSet, Element};
use crate::error::{Error, Result};
use crate::ops::{ActivationOps, Output};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{
    detach_input, dispatch_dtype, enter_kernel, normalize_axis, prepare_output,
};
use crate::runtime::host::kernels;

/// Dtypes the softmax family is instantiated for
const SOFTMAX_DTYPES: DTypeSet = DTypeSet::single(DType::F16).with(DType::F32);

#[derive(Clone, Copy)]
enum Normalization {
    Softmax,
    LogSoftmax,
}

impl Normalization {
    fn name(self) -> &'static str {
        match self {
            Self::Softmax => "softmax",
            Self::LogSoftmax => "log_softmax",
        }
    }
}

impl ActivationOps for HostClient {
    fn softmax(&self, input: &DeviceArray, axis: isize, out: Output<'_>) -> Result<DeviceArray> {
        softmax_impl(self, Normalization::Softmax, input, axis, out)
    }

    fn log_softmax(
        &self,
        input: &DeviceArray,
        axis: isize,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        softmax_impl(self, Normalization::LogSoftmax, input, axis, out)
    }
}

fn softmax_impl(
    client: &HostClient,
    kind: Normalization,
    input: &DeviceArray,
    axis: isize,
    out: Output<'_>,
) -> Result<DeviceArray> {
    let dtype = input.dtype();
    tracing::debug!("{}: {input} axis={axis}", kind.name());

    let axis_idx = normalize_axis(axis, input.ndim())?;
    if !SOFTMAX_DTYPES.contains(dtype) {
        return Err(Error::unsupported_dtype(dtype, kind.name()));
    }
    let (outer_size, dim_size, inner_size) = input.layout().lanes(axis_idx);
    let result = prepare_output(client, &out, input.shape(), dtype)?;
    let source = detach_input(input, &result);

    let _span = enter_kernel(kind.name(), dtype);
    dispatch_dtype!(dtype, SOFTMAX_DTYPES, T => {
        softmax_typed::<T>(kind, &source, &result, outer_size, dim_size, inner_size)
    }, kind.name())?;

    Ok(result)
}

fn softmax_typed<T: Element>(
    kind: Normalization,
    input: &DeviceArray,
    out: &DeviceArray,
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
) -> Result<()> {
    let in_map = input.map_read();
    let mut out_map = out.map_write();
    let src = in_map.view::<T>()?;
    let mut dst = out_map.view_mut::<T>()?;
    let kernel = match kind {
        Normalization::Softmax => kernels::softmax_kernel::<T>,
        Normalization::LogSoftmax => kernels::log_softmax_kernel::<T>,
    };
    kernel(src.as_slice(), dst.as_mut_slice(), outer_size, dim_size, inner_size);
    Ok(())
}
