//! Storage: host-mapped buffers with Arc-based sharing

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::HostDevice;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Buffer memory for array data
///
/// Storage wraps a host allocation with reference counting so that array
/// handles can share it. The words are 8-byte aligned, which covers every
/// element type a kernel reinterprets the bytes as.
///
/// Memory is released when the last handle is dropped.
#[derive(Clone)]
pub struct Storage {
    inner: Arc<StorageInner>,
}

struct StorageInner {
    /// Backing words; only the first `byte_len` bytes are element data
    words: RwLock<Vec<u64>>,
    /// Size of the element data in bytes
    byte_len: usize,
    /// Element type
    dtype: DType,
    /// Device the allocation belongs to
    device: HostDevice,
    /// Whether the allocation is also exposed to the accelerator
    device_visible: bool,
}

impl Storage {
    /// Allocate zero-filled storage for `len` elements of `dtype`
    pub fn new(len: usize, dtype: DType, device: &HostDevice, device_visible: bool) -> Self {
        let byte_len = len * dtype.size_in_bytes();
        tracing::trace!(
            "allocating {byte_len} bytes for {len} x {dtype} (device_visible={device_visible})"
        );
        Self::from_words(
            vec![0u64; byte_len.div_ceil(8)],
            byte_len,
            dtype,
            device,
            device_visible,
        )
    }

    /// Create storage holding a copy of `data`
    pub fn from_slice<T: Element>(data: &[T], device: &HostDevice) -> Self {
        Self::copy_bytes(bytemuck::cast_slice(data), T::DTYPE, device, false)
    }

    /// Create storage from raw bytes with explicit dtype
    ///
    /// The byte count must be a whole number of elements.
    pub fn from_bytes(data: &[u8], dtype: DType, device: &HostDevice) -> Result<Self> {
        if data.len() % dtype.size_in_bytes() != 0 {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "{} bytes is not a whole number of {dtype} elements",
                    data.len()
                ),
            ));
        }
        Ok(Self::copy_bytes(data, dtype, device, false))
    }

    fn copy_bytes(data: &[u8], dtype: DType, device: &HostDevice, device_visible: bool) -> Self {
        let mut words = vec![0u64; data.len().div_ceil(8)];
        bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..data.len()].copy_from_slice(data);
        Self::from_words(words, data.len(), dtype, device, device_visible)
    }

    fn from_words(
        words: Vec<u64>,
        byte_len: usize,
        dtype: DType,
        device: &HostDevice,
        device_visible: bool,
    ) -> Self {
        Self {
            inner: Arc::new(StorageInner {
                words: RwLock::new(words),
                byte_len,
                dtype,
                device: device.clone(),
                device_visible,
            }),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.byte_len / self.inner.dtype.size_in_bytes()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.byte_len == 0
    }

    /// Get the size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.byte_len
    }

    /// Get the dtype
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &HostDevice {
        &self.inner.device
    }

    /// Whether the allocation is also exposed to the accelerator
    #[inline]
    pub fn is_device_visible(&self) -> bool {
        self.inner.device_visible
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Whether both handles refer to the same allocation
    #[inline]
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy of the element bytes in a fresh allocation with the same flags
    pub fn deep_copy(&self) -> Self {
        let words = self.inner.words.read().clone();
        Self::from_words(
            words,
            self.inner.byte_len,
            self.inner.dtype,
            &self.inner.device,
            self.inner.device_visible,
        )
    }

    /// Shared read access
    ///
    /// Recursive so a thread may map the same storage twice (`a + a`) even
    /// while another thread waits to write.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<u64>> {
        self.inner.words.read_recursive()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<u64>> {
        self.inner.words.write()
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len())
            .field("dtype", &self.inner.dtype)
            .field("device_visible", &self.inner.device_visible)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
