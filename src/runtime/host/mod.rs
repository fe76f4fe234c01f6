//! Host runtime implementation
//!
//! The host runtime is the only backend: every kernel reads and writes host
//! memory. A `device_visible` allocation is still host memory, flagged as
//! also exposed to the accelerator.

mod client;
mod config;
mod device;
pub(crate) mod helpers;
pub(crate) mod kernels;

pub use client::HostClient;
pub use config::{HostConfig, RoundingMode};
pub use device::HostDevice;
