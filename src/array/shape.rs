//! Shape: ordered sequence of dimension descriptors

use super::dim::Dim;
use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

/// Stack allocation threshold for dimensions
/// Most views have 4 or fewer axes, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Shape: the ordered dimension descriptors of a view
///
/// The element offset of the coordinate `[c0, c1, ..., cn]` relative to the
/// start of the view's storage is:
///   (c0 - min0) * stride0 + (c1 - min1) * stride1 + ... + (cn - minn) * striden
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Shape(SmallVec<[Dim; STACK_DIMS]>);

impl Shape {
    /// Create an empty (rank-0) shape.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Create an empty shape with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(SmallVec::with_capacity(capacity))
    }

    /// Create a packed row-major shape from extents, bounds starting at 0
    ///
    /// # Example
    /// ```
    /// use einsumr::array::Shape;
    /// let shape = Shape::contiguous(&[2, 3, 4]);
    /// let strides: Vec<isize> = shape.dims().iter().map(|d| d.stride()).collect();
    /// assert_eq!(strides, &[12, 4, 1]);
    /// ```
    pub fn contiguous(extents: &[usize]) -> Self {
        Self::packed(extents.iter().map(|&e| (0, e)))
    }

    /// Create a packed row-major shape from (min, extent) bounds
    ///
    /// Lower bounds are preserved; steps are chosen fresh, so the shape
    /// addresses a dense buffer of `elem_count()` elements regardless of
    /// where the bounds came from.
    pub fn packed(bounds: impl IntoIterator<Item = (isize, usize)>) -> Self {
        let bounds: SmallVec<[(isize, usize); STACK_DIMS]> = bounds.into_iter().collect();
        let mut strides: SmallVec<[isize; STACK_DIMS]> = SmallVec::with_capacity(bounds.len());
        let mut stride = 1isize;
        for &(_, extent) in bounds.iter().rev() {
            strides.push(stride);
            stride *= extent as isize;
        }
        strides.reverse();
        Self(
            bounds
                .iter()
                .zip(strides)
                .map(|(&(min, extent), stride)| Dim::new(min, extent, stride))
                .collect(),
        )
    }

    /// Push a dimension.
    pub fn push(&mut self, dim: Dim) {
        self.0.push(dim);
    }

    /// View the dimensions as a slice.
    pub fn dims(&self) -> &[Dim] {
        self.0.as_slice()
    }

    /// Number of axes (rank)
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Whether this shape has zero axes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of coordinates
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.0.iter().map(|d| d.extent()).product()
    }

    /// Compute the element offset for given coordinates
    ///
    /// Returns None if the coordinate count does not match the rank or any
    /// coordinate falls outside its axis bounds.
    pub fn offset_of(&self, coords: &[isize]) -> Option<usize> {
        if coords.len() != self.rank() {
            return None;
        }
        for (&c, d) in coords.iter().zip(self.0.iter()) {
            if c < d.min() || c >= d.end() {
                return None;
            }
        }
        Some(self.offset_unchecked(coords))
    }

    /// Compute the element offset without bounds checks
    ///
    /// Coordinates must be in range; the result is meaningless otherwise.
    pub(crate) fn offset_unchecked(&self, coords: &[isize]) -> usize {
        let mut offset = 0isize;
        for (&c, d) in coords.iter().zip(self.0.iter()) {
            offset += (c - d.min()) * d.stride();
        }
        offset as usize
    }

    /// The storage length a view of this shape requires
    ///
    /// Zero-step axes replay storage rather than extending it, so a
    /// broadcast shape can span far fewer elements than `elem_count()`.
    /// Shapes with any empty axis address nothing and require none.
    /// Steps are assumed non-negative.
    pub fn storage_span(&self) -> usize {
        if self.elem_count() == 0 {
            return 0;
        }
        let mut last = 0isize;
        for d in self.0.iter() {
            if d.stride() > 0 {
                last += (d.extent() as isize - 1) * d.stride();
            }
        }
        last as usize + 1
    }
}

impl Deref for Shape {
    type Target = [Dim];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl DerefMut for Shape {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[Dim]> for Shape {
    fn as_ref(&self) -> &[Dim] {
        self.0.as_slice()
    }
}

impl From<SmallVec<[Dim; STACK_DIMS]>> for Shape {
    fn from(value: SmallVec<[Dim; STACK_DIMS]>) -> Self {
        Self(value)
    }
}

impl From<Vec<Dim>> for Shape {
    fn from(value: Vec<Dim>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<&[Dim]> for Shape {
    fn from(value: &[Dim]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl<const N: usize> From<[Dim; N]> for Shape {
    fn from(value: [Dim; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<Dim> for Shape {
    fn from_iter<T: IntoIterator<Item = Dim>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_strides() {
        let shape = Shape::contiguous(&[2, 3, 4]);
        let strides: Vec<isize> = shape.dims().iter().map(|d| d.stride()).collect();
        assert_eq!(strides, &[12, 4, 1]);
        assert_eq!(shape.elem_count(), 24);
        assert_eq!(shape.storage_span(), 24);
    }

    #[test]
    fn test_rank0() {
        let shape = Shape::new();
        assert_eq!(shape.rank(), 0);
        assert_eq!(shape.elem_count(), 1);
        assert_eq!(shape.storage_span(), 1);
        assert_eq!(shape.offset_of(&[]), Some(0));
    }

    #[test]
    fn test_offset_of() {
        let shape = Shape::contiguous(&[2, 3]);
        assert_eq!(shape.offset_of(&[0, 0]), Some(0));
        assert_eq!(shape.offset_of(&[0, 2]), Some(2));
        assert_eq!(shape.offset_of(&[1, 0]), Some(3));
        assert_eq!(shape.offset_of(&[1, 2]), Some(5));
        assert_eq!(shape.offset_of(&[2, 0]), None); // out of bounds
        assert_eq!(shape.offset_of(&[1]), None); // wrong rank
    }

    #[test]
    fn test_offset_with_min() {
        let shape = Shape::packed([(1, 2), (-1, 3)]);
        assert_eq!(shape.offset_of(&[1, -1]), Some(0));
        assert_eq!(shape.offset_of(&[2, 1]), Some(5));
        assert_eq!(shape.offset_of(&[0, 0]), None);
    }

    #[test]
    fn test_broadcast_span() {
        let shape = Shape::from([Dim::new(0, 2, 1), Dim::broadcast(0, 100)]);
        assert_eq!(shape.elem_count(), 200);
        assert_eq!(shape.storage_span(), 2);
    }

    #[test]
    fn test_empty_axis_span() {
        let shape = Shape::contiguous(&[3, 0]);
        assert_eq!(shape.elem_count(), 0);
        assert_eq!(shape.storage_span(), 0);
    }
}
