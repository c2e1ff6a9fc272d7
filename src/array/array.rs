//! Owned arrays and borrowed views over strided storage

use super::alloc::{Allocator, DefaultAllocator};
use super::shape::Shape;
use crate::element::Element;
use crate::error::{Error, Result};
use std::fmt;

/// An owned multi-dimensional array
///
/// Storage is a dense packed buffer addressed through a [`Shape`]. Strided
/// and broadcast layouts are the business of borrowed views
/// ([`ArrayView::from_parts`]); owned arrays are always packed row-major.
pub struct Array<T: Element> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Element> Array<T> {
    /// Create an array of zeros with the given extents
    pub fn zeros(extents: &[usize]) -> Self {
        Self::filled(extents, T::zero())
    }

    /// Create an array with every element set to `value`
    pub fn filled(extents: &[usize], value: T) -> Self {
        Self::filled_in(extents, value, &DefaultAllocator)
    }

    /// Create a filled array with storage from the given allocator
    pub fn filled_in<A: Allocator>(extents: &[usize], value: T, alloc: &A) -> Self {
        Self::from_shape(Shape::contiguous(extents), value, alloc)
    }

    /// Create a filled array over an already-packed shape
    ///
    /// The shape must address a dense buffer (`storage_span() ==
    /// elem_count()`), which holds for any shape built by [`Shape::packed`].
    pub(crate) fn from_shape<A: Allocator>(shape: Shape, value: T, alloc: &A) -> Self {
        debug_assert_eq!(shape.storage_span(), shape.elem_count());
        let data = alloc.allocate(shape.storage_span(), value);
        Self { data, shape }
    }

    /// Create an array from a flat slice in row-major order
    ///
    /// The slice length must equal the product of the extents.
    ///
    /// # Example
    /// ```
    /// use einsumr::array::Array;
    /// let a = Array::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(a.get(&[1, 0]), Some(3.0));
    /// ```
    pub fn from_slice(data: &[T], extents: &[usize]) -> Result<Self> {
        let shape = Shape::contiguous(extents);
        if data.len() != shape.elem_count() {
            return Err(Error::storage_mismatch(shape.elem_count(), data.len()));
        }
        Ok(Self {
            data: data.to_vec(),
            shape,
        })
    }

    /// The array's shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of axes
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Read the element at the given coordinates, if in bounds
    pub fn get(&self, coords: &[isize]) -> Option<T> {
        self.shape.offset_of(coords).map(|i| self.data[i])
    }

    /// The flat storage in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// An immutable view of the whole array
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &self.data,
            shape: self.shape.clone(),
        }
    }

    /// A mutable view of the whole array
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut self.data,
            shape: self.shape.clone(),
        }
    }
}

impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("shape", &self.shape)
            .field("data", &self.data)
            .finish()
    }
}

/// An immutable strided view over borrowed storage
#[derive(Clone)]
pub struct ArrayView<'a, T: Element> {
    data: &'a [T],
    shape: Shape,
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// Create a view of `data` addressed through `shape`
    ///
    /// This is the way to place a broadcast (zero-step) or custom-strided
    /// layout over existing storage. Fails if any step is negative or the
    /// storage is too small for the shape's span.
    pub fn from_parts(data: &'a [T], shape: Shape) -> Result<Self> {
        validate_span(data.len(), &shape)?;
        Ok(Self { data, shape })
    }

    /// The view's shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Read the element at the given coordinates, if in bounds
    pub fn get(&self, coords: &[isize]) -> Option<T> {
        self.shape.offset_of(coords).map(|i| self.data[i])
    }

    /// The borrowed flat storage
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

impl<T: Element> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("shape", &self.shape)
            .finish()
    }
}

/// A mutable strided view over borrowed storage
pub struct ArrayViewMut<'a, T: Element> {
    data: &'a mut [T],
    shape: Shape,
}

impl<'a, T: Element> ArrayViewMut<'a, T> {
    /// Create a mutable view of `data` addressed through `shape`
    ///
    /// Same validation as [`ArrayView::from_parts`].
    pub fn from_parts(data: &'a mut [T], shape: Shape) -> Result<Self> {
        validate_span(data.len(), &shape)?;
        Ok(Self { data, shape })
    }

    /// A rank-0 view of a single element
    pub fn scalar(value: &'a mut T) -> Self {
        Self {
            data: std::slice::from_mut(value),
            shape: Shape::new(),
        }
    }

    /// The view's shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The borrowed flat storage
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }
}

impl<T: Element> fmt::Debug for ArrayViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayViewMut")
            .field("shape", &self.shape)
            .finish()
    }
}

fn validate_span(len: usize, shape: &Shape) -> Result<()> {
    if shape.dims().iter().any(|d| d.stride() < 0) {
        return Err(Error::NegativeStep);
    }
    let required = shape.storage_span();
    if len < required {
        return Err(Error::storage_mismatch(required, len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dim;

    #[test]
    fn test_from_slice() {
        let a = Array::from_slice(&[1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert_eq!(a.get(&[0, 0]), Some(1));
        assert_eq!(a.get(&[1, 2]), Some(6));
        assert_eq!(a.get(&[2, 0]), None);
    }

    #[test]
    fn test_from_slice_length_mismatch() {
        let err = Array::from_slice(&[1, 2, 3], &[2, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::StorageMismatch {
                required: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn test_broadcast_view() {
        let data = [10.0, 20.0];
        let shape = Shape::from([Dim::new(0, 2, 1), Dim::broadcast(0, 3)]);
        let v = ArrayView::from_parts(&data, shape).unwrap();
        assert_eq!(v.get(&[0, 0]), Some(10.0));
        assert_eq!(v.get(&[0, 2]), Some(10.0));
        assert_eq!(v.get(&[1, 1]), Some(20.0));
        assert_eq!(v.get(&[1, 3]), None);
    }

    #[test]
    fn test_view_span_too_small() {
        let data = [1.0; 4];
        let shape = Shape::contiguous(&[2, 3]);
        assert!(ArrayView::from_parts(&data, shape).is_err());
    }

    #[test]
    fn test_negative_step_rejected() {
        let data = [1.0; 4];
        let shape = Shape::from([Dim::new(0, 4, -1)]);
        assert!(matches!(
            ArrayView::from_parts(&data, shape),
            Err(Error::NegativeStep)
        ));
    }

    #[test]
    fn test_scalar_view() {
        let mut x = 5.0;
        let v = ArrayViewMut::scalar(&mut x);
        assert_eq!(v.shape().rank(), 0);
    }
}
