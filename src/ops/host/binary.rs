//! Host implementation of binary arithmetic operations.

use crate::array::{DeviceArray, ReadMapping};
use crate::dtype::{DTypeSet, Element, promote};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, BinaryOps, Operand, Output, Scalar, TypeConversionOps};
use crate::runtime::HostClient;
use crate::runtime::host::helpers::{detach_input, dispatch_dtype, enter_kernel, prepare_output};
use crate::runtime::host::kernels::{self, BinaryInput};

/// Dtypes binary arithmetic is instantiated for
const BINARY_DTYPES: DTypeSet = DTypeSet::NUMERIC;

impl BinaryOps for HostClient {
    fn add<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        binary_op_impl(self, BinaryOp::Add, lhs.into(), rhs.into(), out)
    }

    fn subtract<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        binary_op_impl(self, BinaryOp::Sub, lhs.into(), rhs.into(), out)
    }

    fn multiply<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        binary_op_impl(self, BinaryOp::Mul, lhs.into(), rhs.into(), out)
    }

    fn divide<'a>(
        &self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'a>>,
        out: Output<'_>,
    ) -> Result<DeviceArray> {
        binary_op_impl(self, BinaryOp::Div, lhs.into(), rhs.into(), out)
    }
}

/// Operand after conversion to the promoted dtype
enum Side {
    Array(DeviceArray),
    Scalar(Scalar),
}

/// Operand with its buffer mapped for reading
enum MappedSide<'m> {
    Array(ReadMapping<'m>),
    Scalar(Scalar),
}

impl Side {
    fn map_read(&self) -> MappedSide<'_> {
        match self {
            Self::Array(array) => MappedSide::Array(array.map_read()),
            Self::Scalar(scalar) => MappedSide::Scalar(*scalar),
        }
    }
}

impl MappedSide<'_> {
    fn typed<T: Element>(&self) -> Result<BinaryInput<'_, T>> {
        match self {
            Self::Array(mapping) => Ok(BinaryInput::Array(mapping.view::<T>()?.as_slice())),
            Self::Scalar(scalar) => Ok(BinaryInput::Scalar(scalar.to_element::<T>()?)),
        }
    }
}

fn binary_op_impl(
    client: &HostClient,
    op: BinaryOp,
    lhs: Operand<'_>,
    rhs: Operand<'_>,
    out: Output<'_>,
) -> Result<DeviceArray> {
    let op_name = op.name();
    let dtype = promote(lhs.dtype(), rhs.dtype())?;
    tracing::debug!(
        "{op_name}: {} with {} -> {dtype}",
        describe(&lhs),
        describe(&rhs)
    );

    if !BINARY_DTYPES.contains(dtype) {
        return Err(Error::unsupported_dtype(dtype, op_name));
    }

    let shape = match (lhs.array(), rhs.array()) {
        (Some(a), Some(b)) => {
            if a.shape() != b.shape() {
                return Err(Error::shape_mismatch(a.shape(), b.shape()));
            }
            a.shape()
        }
        (Some(array), None) | (None, Some(array)) => array.shape(),
        (None, None) => {
            return Err(Error::invalid_argument(
                "lhs",
                "elementwise operations require at least one array operand",
            ));
        }
    };

    let result = prepare_output(client, &out, shape, dtype)?;
    let lhs = conform(client, lhs, &result)?;
    let rhs = conform(client, rhs, &result)?;

    let _span = enter_kernel(op_name, dtype);
    dispatch_dtype!(dtype, BINARY_DTYPES, T => {
        binary_typed::<T>(op, &lhs, &rhs, &result)
    }, op_name)?;

    Ok(result)
}

/// Bring an operand to the output dtype, snapshotting arrays that alias `out`
fn conform(client: &HostClient, operand: Operand<'_>, out: &DeviceArray) -> Result<Side> {
    match operand {
        Operand::Scalar(scalar) => Ok(Side::Scalar(scalar)),
        Operand::Array(array) if array.dtype() != out.dtype() => {
            tracing::trace!("converting {array} to {}", out.dtype());
            let converted = client.convert(array, Some(out.dtype()), Output::new())?;
            Ok(Side::Array(converted))
        }
        Operand::Array(array) => Ok(Side::Array(detach_input(array, out))),
    }
}

fn binary_typed<T: Element>(op: BinaryOp, lhs: &Side, rhs: &Side, out: &DeviceArray) -> Result<()> {
    let lhs_mapped = lhs.map_read();
    let rhs_mapped = rhs.map_read();
    let a = lhs_mapped.typed::<T>()?;
    let b = rhs_mapped.typed::<T>()?;

    if op == BinaryOp::Div && T::DTYPE.is_int() && has_zero(&b) {
        return Err(Error::invalid_argument("rhs", "integer division by zero"));
    }

    let mut out_map = out.map_write();
    let mut dst = out_map.view_mut::<T>()?;
    kernels::binary_op_kernel(op, a, b, dst.as_mut_slice());
    Ok(())
}

fn has_zero<T: Element>(input: &BinaryInput<'_, T>) -> bool {
    match input {
        BinaryInput::Array(values) => values.iter().any(|&v| v == T::zero()),
        BinaryInput::Scalar(value) => *value == T::zero(),
    }
}

fn describe(operand: &Operand<'_>) -> String {
    match operand {
        Operand::Array(array) => array.to_string(),
        Operand::Scalar(scalar) => format!("{scalar:?}"),
    }
}
