//! Host implementation of random operations.

use crate::array::{DeviceArray, WriteMapping};
use crate::dtype::{DType, DTypeSet};
use crate::error::{Error, Result};
use crate::ops::RandomOps;
use crate::random::{RandomGenerator, default_generator};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{dispatch_dtype, enter_kernel};
use crate::runtime::host::kernels;

/// Dtypes fill_randn is instantiated for
const RANDN_DTYPES: DTypeSet = DTypeSet::REDUCED_FLOATS;

impl RandomOps for HostClient {
    fn fill_randn(
        &self,
        out: &DeviceArray,
        generator: Option<&mut RandomGenerator>,
    ) -> Result<()> {
        let dtype = out.dtype();
        tracing::debug!(
            "fill_randn: {out} generator={}",
            if generator.is_some() { "explicit" } else { "default" }
        );

        if !RANDN_DTYPES.contains(dtype) {
            return Err(Error::unsupported_dtype(dtype, "fill_randn"));
        }

        let _span = enter_kernel("fill_randn", dtype);
        let mut out_map = out.map_write();
        match generator {
            Some(generator) => randn_fill(generator, &mut out_map, dtype),
            None => randn_fill(&mut default_generator(), &mut out_map, dtype),
        }
    }
}

fn randn_fill(
    generator: &mut RandomGenerator,
    out_map: &mut WriteMapping<'_>,
    dtype: DType,
) -> Result<()> {
    dispatch_dtype!(dtype, RANDN_DTYPES, T => {
        let mut dst = out_map.view_mut::<T>()?;
        kernels::randn_kernel(generator.engine(), dst.as_mut_slice());
        Ok(())
    }, "fill_randn")
}
