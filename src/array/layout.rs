//! Layout: shape and strides for array memory layout

use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Most arrays have 4 or fewer dimensions, so we stack-allocate up to 4
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of an array
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each dimension
/// NOTE: Strides are in ELEMENTS, not bytes
pub type Strides = SmallVec<[usize; STACK_DIMS]>;

/// Layout describes how the elements of an array sit in its buffer
///
/// Arrays own dense row-major buffers. A non-contiguous layout only appears as
/// an intermediate, e.g. the permuted read order used by transpose.
///
/// Address of element at indices [i0, i1, ..., in]:
///   i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    /// Shape: size along each dimension
    shape: Shape,
    /// Strides: offset (in elements) between consecutive elements along each dimension
    strides: Strides,
}

impl Layout {
    /// Create a new contiguous (row-major/C-order) layout from a shape
    ///
    /// # Example
    /// ```
    /// use hostops::array::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let shape: Shape = shape.iter().copied().collect();
        let strides = Self::compute_contiguous_strides(&shape);
        Self { shape, strides }
    }

    /// Compute contiguous strides for a given shape (row-major order)
    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1usize;

        // Compute strides from last dimension to first
        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride *= dim;
        }

        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Check if memory is contiguous (row-major order)
    pub fn is_contiguous(&self) -> bool {
        self.strides == Self::compute_contiguous_strides(&self.shape)
    }

    /// Compute the linear index (element offset) for given indices
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }

        let mut linear = 0usize;
        for ((&idx, &dim), &stride) in indices.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim {
                return None;
            }
            linear += idx * stride;
        }

        Some(linear)
    }

    /// Insert a unit-size dimension at `axis`
    ///
    /// `axis` ranges over `[-(ndim + 1), ndim]`; negative values count from
    /// the end of the result, so -1 appends a trailing axis.
    pub fn expand_dims(&self, axis: isize) -> Option<Self> {
        let ndim = self.ndim();
        let idx = if axis < 0 {
            ndim as isize + axis + 1
        } else {
            axis
        };

        if idx < 0 || idx as usize > ndim {
            return None;
        }
        let idx = idx as usize;

        let mut new_shape = self.shape.clone();
        let mut new_strides = self.strides.clone();

        // Stride of the unit axis: span of the dimension it precedes
        let new_stride = if idx < ndim {
            new_strides[idx] * new_shape[idx]
        } else {
            1
        };

        new_shape.insert(idx, 1);
        new_strides.insert(idx, new_stride);

        Some(Self {
            shape: new_shape,
            strides: new_strides,
        })
    }

    /// Reorder dimensions without moving data
    ///
    /// Dimension `i` of the result is dimension `dims[i]` of `self`. Returns
    /// None unless `dims` is a permutation of `0..ndim`.
    pub fn permute(&self, dims: &[usize]) -> Option<Self> {
        if !is_permutation(dims, self.ndim()) {
            return None;
        }

        Some(Self {
            shape: dims.iter().map(|&d| self.shape[d]).collect(),
            strides: dims.iter().map(|&d| self.strides[d]).collect(),
        })
    }

    /// Split the layout around `axis` into (outer, axis length, inner) extents
    ///
    /// Used by every single-axis reduction: element `(o, k, i)` lives at
    /// `o * axis_len * inner + k * inner + i` in a contiguous buffer.
    pub fn lanes(&self, axis: usize) -> (usize, usize, usize) {
        let outer: usize = self.shape[..axis].iter().product();
        let inner: usize = self.shape[axis + 1..].iter().product();
        (outer, self.shape[axis], inner)
    }

    /// Element offsets in logical (row-major index) order
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            layout: self,
            index: SmallVec::from_elem(0, self.ndim()),
            offset: 0,
            remaining: self.elem_count(),
        }
    }
}

/// Iterator over the buffer offsets of a layout, see [`Layout::offsets`]
pub struct Offsets<'a> {
    layout: &'a Layout,
    index: Shape,
    offset: usize,
    remaining: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.offset;

        // Odometer increment, updating the offset incrementally
        for d in (0..self.index.len()).rev() {
            self.index[d] += 1;
            self.offset += self.layout.strides[d];
            if self.index[d] < self.layout.shape[d] {
                break;
            }
            self.offset -= self.layout.strides[d] * self.index[d];
            self.index[d] = 0;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}

/// Check that `dims` uses each of `0..ndim` exactly once
pub(crate) fn is_permutation(dims: &[usize], ndim: usize) -> bool {
    if dims.len() != ndim {
        return false;
    }
    let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, ndim);
    for &d in dims {
        if d >= ndim || seen[d] {
            return false;
        }
        seen[d] = true;
    }
    true
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?} }}",
            self.shape.as_slice(),
            self.strides.as_slice(),
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}
