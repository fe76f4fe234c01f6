//! Data movement kernels

use crate::array::Layout;

/// Copy elements in the order described by a (possibly permuted) layout
///
/// `src_layout` views the source buffer with its dimensions reordered; the
/// output receives those elements densely in row-major order.
#[inline]
pub fn permute_kernel<C: Copy>(src: &[C], src_layout: &Layout, out: &mut [C]) {
    for (o, offset) in out.iter_mut().zip(src_layout.offsets()) {
        *o = src[offset];
    }
}
