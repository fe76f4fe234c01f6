//! Core DeviceArray type

use super::{Layout, ReadMapping, Storage, WriteMapping};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::HostDevice;
use std::fmt;

/// Dense row-major array in host-mapped memory
///
/// A `DeviceArray` pairs reference-counted [`Storage`] with a [`Layout`].
/// Cloning a handle shares the storage; operations write their results into
/// a caller-supplied output or a freshly allocated one.
///
/// # Example
///
/// ```
/// use hostops::array::DeviceArray;
/// use hostops::runtime::HostDevice;
///
/// let device = HostDevice::new();
/// let a = DeviceArray::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device).unwrap();
/// let b = a.expand_dims(0).unwrap();
/// assert_eq!(b.shape(), &[1, 2, 2]);
/// assert!(a.shares_storage(&b));
/// ```
#[derive(Clone)]
pub struct DeviceArray {
    /// Element buffer
    storage: Storage,
    /// Shape and strides
    layout: Layout,
}

impl DeviceArray {
    /// Allocate a zero-filled array on the host
    ///
    /// `device_visible` marks the allocation as exposed to the accelerator
    /// as well; the element data is identical either way.
    pub fn for_host(
        device: &HostDevice,
        shape: &[usize],
        dtype: DType,
        device_visible: bool,
    ) -> Self {
        let layout = Layout::contiguous(shape);
        let storage = Storage::new(layout.elem_count(), dtype, device, device_visible);
        Self { storage, layout }
    }

    /// Create an array holding a copy of `data`
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &HostDevice) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        Ok(Self {
            storage: Storage::from_slice(data, device),
            layout: Layout::contiguous(shape),
        })
    }

    /// Wrap existing storage with a shape
    pub fn from_storage(storage: Storage, shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape);
        if layout.elem_count() != storage.len() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![storage.len()],
            });
        }
        Ok(Self { storage, layout })
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &HostDevice {
        self.storage.device()
    }

    /// Whether the buffer is also exposed to the accelerator
    #[inline]
    pub fn is_device_visible(&self) -> bool {
        self.storage.is_device_visible()
    }

    /// Size of the element data in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.storage.size_in_bytes()
    }

    // ===== Shape =====

    /// Insert a dimension of size 1, sharing storage
    pub fn expand_dims(&self, axis: isize) -> Result<Self> {
        let layout = self
            .layout
            .expand_dims(axis)
            .ok_or(Error::InvalidDimension {
                dim: axis,
                ndim: self.ndim() + 1,
            })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout,
        })
    }

    /// Same storage reinterpreted with another shape of equal element count
    pub(crate) fn with_shape(&self, shape: &[usize]) -> Result<Self> {
        Self::from_storage(self.storage.clone(), shape)
    }

    // ===== Mapping =====

    /// Map the buffer for reading
    ///
    /// Blocks while a write mapping of the same storage is alive.
    pub fn map_read(&self) -> ReadMapping<'_> {
        ReadMapping::new(
            self.storage.read(),
            self.storage.size_in_bytes(),
            self.dtype(),
            &self.layout,
        )
    }

    /// Map the buffer for writing
    ///
    /// Blocks while any other mapping of the same storage is alive.
    pub fn map_write(&self) -> WriteMapping<'_> {
        WriteMapping::new(
            self.storage.write(),
            self.storage.size_in_bytes(),
            self.dtype(),
            &self.layout,
        )
    }

    /// Copy elements out in row-major order
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let mapping = self.map_read();
        let view = mapping.view::<T>()?;
        Ok(view.as_slice().to_vec())
    }

    /// Whether both arrays live in the same allocation
    #[inline]
    pub fn shares_storage(&self, other: &DeviceArray) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Copy of this array in a fresh allocation
    pub fn deep_copy(&self) -> Self {
        Self {
            storage: self.storage.deep_copy(),
            layout: self.layout.clone(),
        }
    }
}

impl fmt::Debug for DeviceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceArray")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("device_visible", &self.is_device_visible())
            .finish()
    }
}

impl fmt::Display for DeviceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceArray({:?}, dtype={})", self.shape(), self.dtype())
    }
}
