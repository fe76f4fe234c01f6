//! Arrays: host-mapped buffers, layouts and typed views
//!
//! A [`DeviceArray`] is a dense row-major buffer that the host maps for the
//! duration of a kernel. Views obtained from a mapping carry the shape, so a
//! kernel can index by position or walk lanes along an axis.

mod device_array;
mod layout;
mod storage;
mod view;

pub use device_array::DeviceArray;
pub use layout::{Layout, Offsets, Shape, Strides};
pub(crate) use layout::is_permutation;
pub use storage::Storage;
pub use view::{ArrayView, ArrayViewMut, ReadMapping, WriteMapping};
