//! Host implementation of unary operations.

use crate::array::DeviceArray;
use crate::dtype::{DTypeSet, Element};
use crate::error::{Error, Result};
use crate::ops::{Output, UnaryOp, UnaryOps};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{detach_input, dispatch_dtype, enter_kernel, prepare_output};
use crate::runtime::host::kernels;

/// Dtypes exp and log are instantiated for
const UNARY_DTYPES: DTypeSet = DTypeSet::REDUCED_FLOATS;

impl UnaryOps for HostClient {
    fn exp(&self, input: &DeviceArray, out: Output<'_>) -> Result<DeviceArray> {
        unary_op_impl(self, UnaryOp::Exp, input, out)
    }

    fn log(&self, input: &DeviceArray, out: Output<'_>) -> Result<DeviceArray> {
        unary_op_impl(self, UnaryOp::Log, input, out)
    }
}

fn unary_op_impl(
    client: &HostClient,
    op: UnaryOp,
    input: &DeviceArray,
    out: Output<'_>,
) -> Result<DeviceArray> {
    let dtype = input.dtype();
    tracing::debug!("{}: {input}", op.name());

    if !UNARY_DTYPES.contains(dtype) {
        return Err(Error::unsupported_dtype(dtype, op.name()));
    }
    let result = prepare_output(client, &out, input.shape(), dtype)?;
    let source = detach_input(input, &result);

    let _span = enter_kernel(op.name(), dtype);
    dispatch_dtype!(dtype, UNARY_DTYPES, T => {
        unary_typed::<T>(op, &source, &result)
    }, op.name())?;

    Ok(result)
}

fn unary_typed<T: Element>(op: UnaryOp, input: &DeviceArray, out: &DeviceArray) -> Result<()> {
    let in_map = input.map_read();
    let mut out_map = out.map_write();
    let src = in_map.view::<T>()?;
    let mut dst = out_map.view_mut::<T>()?;
    kernels::unary_op_kernel(op, src.as_slice(), dst.as_mut_slice());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    #[test]
    fn test_unsupported_dtype_reported_before_out_checks() {
        let client = HostClient::new();
        let input = DeviceArray::from_slice(&[1i32, 2, 3], &[3], client.device()).unwrap();
        let out = DeviceArray::for_host(client.device(), &[5], DType::F32, false);

        let err = client.exp(&input, Output::into(&out)).unwrap_err();
        assert_eq!(err, Error::unsupported_dtype(DType::I32, "exp"));
    }
}
