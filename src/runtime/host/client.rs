//! Host client for operation dispatch

use super::config::HostConfig;
use super::device::HostDevice;

/// Host client for operation dispatch
///
/// Implements every op trait in [`crate::ops`]. Cloning is cheap; clients
/// hold no buffers of their own.
#[derive(Clone, Debug, Default)]
pub struct HostClient {
    pub(crate) device: HostDevice,
    config: HostConfig,
}

impl HostClient {
    /// Create a client on the host device with the default configuration
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    /// Create a client with an explicit configuration
    pub fn with_config(config: HostConfig) -> Self {
        tracing::debug!("creating host client: {config:?}");
        Self {
            device: HostDevice::new(),
            config,
        }
    }

    /// Device new outputs are allocated on
    pub fn device(&self) -> &HostDevice {
        &self.device
    }

    /// Active configuration
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}
