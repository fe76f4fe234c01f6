//! Memory operation kernels (cast, rounding cast, random fill)

use crate::dtype::{Element, cast};
use crate::ops::RoundingOp;
use crate::runtime::RoundingMode;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Cast elements from one type to another
///
/// Integer to integer keeps the low bits; every other pairing goes through
/// f64, which saturates float to integer conversions and maps NaN to 0.
#[inline]
pub fn cast_kernel<S: Element, D: Element>(src: &[S], dst: &mut [D]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = cast::<S, D>(s);
    }
}

/// Round each element to an integral value, then cast to the target type
///
/// Rounding happens on the exact f64 value of the source element, so the
/// result is the same as rounding in the source representation.
#[inline]
pub fn rounding_cast_kernel<S: Element, D: Element>(
    op: RoundingOp,
    mode: RoundingMode,
    src: &[S],
    dst: &mut [D],
) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = D::from_f64(op.apply(s.to_f64(), mode));
    }
}

/// Fill output with standard normal random values (mean=0, std=1)
#[inline]
pub fn randn_kernel<T: Element, R: Rng + ?Sized>(rng: &mut R, out: &mut [T]) {
    let normal = StandardNormal;
    for elem in out.iter_mut() {
        let val: f64 = normal.sample(&mut *rng);
        *elem = T::from_f64(val);
    }
}
