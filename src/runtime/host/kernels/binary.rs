//! Binary operations kernels

use crate::dtype::Element;
use crate::ops::BinaryOp;

/// One side of a binary operation: a full array or a broadcast scalar
#[derive(Clone, Copy)]
pub enum BinaryInput<'a, T> {
    /// Elements in row-major order, one per output element
    Array(&'a [T]),
    /// A single value paired with every output element
    Scalar(T),
}

impl<T: Copy> BinaryInput<'_, T> {
    #[inline(always)]
    fn at(&self, i: usize) -> T {
        match self {
            Self::Array(values) => values[i],
            Self::Scalar(value) => *value,
        }
    }
}

/// Execute a binary operation element-wise
///
/// Integer results wrap on overflow. Integer division by zero must be ruled
/// out by the caller; the kernel writes 0 for it.
#[inline]
pub fn binary_op_kernel<T: Element>(
    op: BinaryOp,
    a: BinaryInput<'_, T>,
    b: BinaryInput<'_, T>,
    out: &mut [T],
) {
    match op {
        BinaryOp::Add => apply(a, b, out, T::wrapping_add),
        BinaryOp::Sub => apply(a, b, out, T::wrapping_sub),
        BinaryOp::Mul => apply(a, b, out, T::wrapping_mul),
        BinaryOp::Div => apply(a, b, out, T::wrapping_div),
    }
}

#[inline(always)]
fn apply<T: Copy>(a: BinaryInput<'_, T>, b: BinaryInput<'_, T>, out: &mut [T], f: fn(T, T) -> T) {
    for (i, o) in out.iter_mut().enumerate() {
        *o = f(a.at(i), b.at(i));
    }
}
