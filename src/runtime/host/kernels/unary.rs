//! Unary operation kernels

use crate::dtype::Element;
use crate::ops::UnaryOp;

/// Execute a unary operation element-wise
///
/// Each element is widened to f64, transformed, and re-encoded, so narrow
/// floats saturate or produce NaN exactly as their encoders define.
#[inline]
pub fn unary_op_kernel<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    let f: fn(f64) -> f64 = match op {
        UnaryOp::Exp => f64::exp,
        UnaryOp::Log => f64::ln,
    };
    for (o, &x) in out.iter_mut().zip(a) {
        *o = T::from_f64(f(x.to_f64()));
    }
}
