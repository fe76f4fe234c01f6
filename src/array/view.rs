//! Typed views over mapped array buffers
//!
//! A buffer is mapped for one kernel invocation through [`ReadMapping`] or
//! [`WriteMapping`]. Views borrow from the mapping, so the borrow checker
//! keeps them from outliving it, and dropping the mapping releases the buffer
//! on every exit path.

use bytemuck::Pod;
use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

use super::Layout;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Read-only mapping of an array buffer
pub struct ReadMapping<'a> {
    guard: RwLockReadGuard<'a, Vec<u64>>,
    byte_len: usize,
    dtype: DType,
    layout: &'a Layout,
}

/// Read-write mapping of an array buffer
pub struct WriteMapping<'a> {
    guard: RwLockWriteGuard<'a, Vec<u64>>,
    byte_len: usize,
    dtype: DType,
    layout: &'a Layout,
}

impl<'a> ReadMapping<'a> {
    pub(crate) fn new(
        guard: RwLockReadGuard<'a, Vec<u64>>,
        byte_len: usize,
        dtype: DType,
        layout: &'a Layout,
    ) -> Self {
        Self {
            guard,
            byte_len,
            dtype,
            layout,
        }
    }

    /// Element bytes
    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.guard[..])[..self.byte_len]
    }

    /// View the buffer as elements of `T`, which must match the array dtype
    pub fn view<T: Element>(&self) -> Result<ArrayView<'_, T>> {
        check_element::<T>(self.dtype)?;
        self.cells()
    }

    /// View the buffer as opaque cells of `T`, which must match the element width
    pub fn cells<T: Pod>(&self) -> Result<ArrayView<'_, T>> {
        check_cell_width::<T>(self.dtype)?;
        Ok(ArrayView {
            data: cast_cells(self.bytes())?,
            layout: self.layout.clone(),
        })
    }
}

impl<'a> WriteMapping<'a> {
    pub(crate) fn new(
        guard: RwLockWriteGuard<'a, Vec<u64>>,
        byte_len: usize,
        dtype: DType,
        layout: &'a Layout,
    ) -> Self {
        Self {
            guard,
            byte_len,
            dtype,
            layout,
        }
    }

    /// Mutable element bytes
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<u64, u8>(&mut self.guard[..])[..self.byte_len]
    }

    /// Mutable view of the buffer as elements of `T`, which must match the array dtype
    pub fn view_mut<T: Element>(&mut self) -> Result<ArrayViewMut<'_, T>> {
        check_element::<T>(self.dtype)?;
        self.cells_mut()
    }

    /// Mutable view of the buffer as opaque cells of `T`
    pub fn cells_mut<T: Pod>(&mut self) -> Result<ArrayViewMut<'_, T>> {
        check_cell_width::<T>(self.dtype)?;
        let layout = self.layout.clone();
        let data = bytemuck::try_cast_slice_mut(self.bytes_mut()).map_err(|e| {
            Error::invalid_argument("array", format!("cannot map buffer cells: {e}"))
        })?;
        Ok(ArrayViewMut { data, layout })
    }
}

fn check_element<T: Element>(dtype: DType) -> Result<()> {
    if T::DTYPE != dtype {
        return Err(Error::dtype_mismatch("array", dtype, T::DTYPE));
    }
    Ok(())
}

fn check_cell_width<T: Pod>(dtype: DType) -> Result<()> {
    if std::mem::size_of::<T>() != dtype.size_in_bytes() {
        return Err(Error::invalid_argument(
            "array",
            format!(
                "{dtype} elements are {} bytes, cells are {}",
                dtype.size_in_bytes(),
                std::mem::size_of::<T>()
            ),
        ));
    }
    Ok(())
}

fn cast_cells<T: Pod>(bytes: &[u8]) -> Result<&[T]> {
    bytemuck::try_cast_slice(bytes)
        .map_err(|e| Error::invalid_argument("array", format!("cannot map buffer cells: {e}")))
}

// ============================================================================
// Views
// ============================================================================

/// Shaped, typed read view over a mapped buffer
pub struct ArrayView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

/// Shaped, typed read-write view over a mapped buffer
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T: Copy> ArrayView<'a, T> {
    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Element at a multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        self.layout.index(index).map(|i| self.data[i])
    }

    /// (outer, axis length, inner) extents around `axis`, see [`Layout::lanes`]
    #[inline]
    pub fn lanes(&self, axis: usize) -> (usize, usize, usize) {
        self.layout.lanes(axis)
    }

    /// Same elements with a unit axis inserted at `axis`
    pub fn expand_dims(self, axis: isize) -> Result<Self> {
        let layout = expand_layout(&self.layout, axis)?;
        Ok(Self {
            data: self.data,
            layout,
        })
    }
}

impl<'a, T: Copy> ArrayViewMut<'a, T> {
    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Mutable elements in row-major order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Mutable element at a multi-dimensional index
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let i = self.layout.index(index)?;
        self.data.get_mut(i)
    }

    /// Same elements with a unit axis inserted at `axis`
    pub fn expand_dims(self, axis: isize) -> Result<Self> {
        let layout = expand_layout(&self.layout, axis)?;
        Ok(Self {
            data: self.data,
            layout,
        })
    }
}

fn expand_layout(layout: &Layout, axis: isize) -> Result<Layout> {
    layout.expand_dims(axis).ok_or(Error::InvalidDimension {
        dim: axis,
        ndim: layout.ndim() + 1,
    })
}
