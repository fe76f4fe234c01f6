//! Host implementation of shape operations.

use crate::array::{DeviceArray, is_permutation};
use crate::error::{Error, Result};
use crate::ops::{Output, ShapeOps};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{detach_input, dispatch_cell, enter_kernel, prepare_output};
use crate::runtime::host::kernels;

impl ShapeOps for HostClient {
    fn transpose(
        &self,
        input: &DeviceArray,
        permutation: &[usize],
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        let dtype = input.dtype();
        tracing::debug!("transpose: {input} permutation={permutation:?}");

        if !is_permutation(permutation, input.ndim()) {
            return Err(Error::invalid_argument(
                "permutation",
                format!(
                    "{permutation:?} is not a permutation of the {} axes of {:?}",
                    input.ndim(),
                    input.shape()
                ),
            ));
        }
        if !dtype.is_byte_aligned() {
            return Err(Error::NotByteAligned {
                dtype,
                op: "transpose",
            });
        }

        // Source read in output order: dims reordered, strides kept
        let src_layout = input.layout().permute(permutation).ok_or_else(|| {
            Error::invalid_argument("permutation", format!("cannot permute by {permutation:?}"))
        })?;
        let result = prepare_output(self, &out, src_layout.shape(), dtype)?;
        let source = detach_input(input, &result);

        let _span = enter_kernel("transpose", dtype);
        dispatch_cell!(dtype, C => {
            let in_map = source.map_read();
            let mut out_map = result.map_write();
            let src = in_map.cells::<C>()?;
            let mut dst = out_map.cells_mut::<C>()?;
            kernels::permute_kernel(src.as_slice(), &src_layout, dst.as_mut_slice());
            Ok(())
        }, "transpose")?;

        Ok(result)
    }
}
