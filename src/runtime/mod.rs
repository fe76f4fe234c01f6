//! Runtime: the host device, its client and kernels
//!
//! Operations are dispatched through a [`HostClient`], which implements the
//! op traits in [`crate::ops`]. Kernels run synchronously on the calling
//! thread over host-mapped buffers.
//!
//! ```text
//! HostClient
//!   ├── HostDevice   (where new outputs are allocated)
//!   └── HostConfig   (rounding tie rule)
//! ```

pub(crate) mod host;

pub use host::{HostClient, HostConfig, HostDevice, RoundingMode};
