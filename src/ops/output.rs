//! Output argument shared by all ops

use crate::array::DeviceArray;

/// Where an op writes its result
///
/// Either a caller-supplied array, which is validated and then overwritten,
/// or a fresh host allocation that is optionally flagged device-visible.
///
/// # Example
///
/// ```
/// use hostops::prelude::*;
///
/// let client = HostClient::new();
/// let x = DeviceArray::from_slice(&[0.0f32, 1.0], &[2], client.device()).unwrap();
///
/// let fresh = client.exp(&x, Output::new()).unwrap();
/// assert!(!fresh.is_device_visible());
///
/// let visible = client.exp(&x, Output::device_visible()).unwrap();
/// assert!(visible.is_device_visible());
///
/// let reused = client.exp(&x, Output::into(&fresh)).unwrap();
/// assert!(reused.shares_storage(&fresh));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Output<'a> {
    array: Option<&'a DeviceArray>,
    device_visible: bool,
}

impl<'a> Output<'a> {
    /// Allocate a fresh host-only result
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh result that is also exposed to the accelerator
    pub fn device_visible() -> Self {
        Self {
            array: None,
            device_visible: true,
        }
    }

    /// Write the result into `array`
    #[allow(clippy::should_implement_trait)]
    pub fn into(array: &'a DeviceArray) -> Self {
        Self {
            array: Some(array),
            device_visible: false,
        }
    }

    /// Caller-supplied output array, if any
    pub fn array(&self) -> Option<&'a DeviceArray> {
        self.array
    }

    /// Whether a freshly allocated result is device-visible
    pub fn is_device_visible(&self) -> bool {
        self.device_visible
    }
}

impl<'a> From<&'a DeviceArray> for Output<'a> {
    fn from(array: &'a DeviceArray) -> Self {
        Self::into(array)
    }
}
