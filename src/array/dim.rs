//! Dim: the per-axis descriptor of a strided view

use std::fmt;

/// Describes one axis of a strided view: lower bound, extent, and step
///
/// The step is the element offset between consecutive coordinates along the
/// axis. A step of zero makes the axis a broadcast (replay) axis: every
/// coordinate revisits the same underlying elements.
///
/// Coordinates along the axis run over the half-open range
/// `min .. min + extent`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Dim {
    min: isize,
    extent: usize,
    stride: isize,
}

impl Dim {
    /// Create a descriptor with explicit bounds and step
    pub fn new(min: isize, extent: usize, stride: isize) -> Self {
        Self {
            min,
            extent,
            stride,
        }
    }

    /// Create a broadcast (zero-step) descriptor with the given bounds
    pub fn broadcast(min: isize, extent: usize) -> Self {
        Self::new(min, extent, 0)
    }

    /// Lower bound of the coordinate range
    #[inline]
    pub fn min(&self) -> isize {
        self.min
    }

    /// Number of coordinates along the axis
    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Element offset between consecutive coordinates
    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    /// One past the last coordinate of the range
    #[inline]
    pub fn end(&self) -> isize {
        self.min + self.extent as isize
    }

    /// Whether this is a broadcast (zero-step) axis
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.stride == 0
    }

    /// Whether `other`'s coordinate range lies within this axis's range
    pub fn in_range(&self, other: &Dim) -> bool {
        other.min >= self.min && other.end() <= self.end()
    }

    /// The same bounds as a broadcast axis
    ///
    /// Converts a native axis into its zero-step replay form, so that a view
    /// can be revisited unchanged while some other binding drives the loop.
    /// The bounds survive the conversion: a replayed axis still may not be
    /// indexed outside them.
    pub fn to_broadcast(&self) -> Dim {
        Self::broadcast(self.min, self.extent)
    }
}

impl fmt::Debug for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dim {{ min: {}, extent: {}, stride: {} }}",
            self.min, self.extent, self.stride
        )
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) step {}", self.min, self.end(), self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let d = Dim::new(-2, 5, 3);
        assert_eq!(d.min(), -2);
        assert_eq!(d.end(), 3);
        assert_eq!(d.extent(), 5);
        assert!(!d.is_broadcast());
    }

    #[test]
    fn test_in_range() {
        let outer = Dim::new(0, 10, 1);
        let inner = Dim::new(2, 4, 7);
        assert!(outer.in_range(&inner));
        assert!(!inner.in_range(&outer));
        // equal ranges contain each other
        assert!(outer.in_range(&outer));
    }

    #[test]
    fn test_to_broadcast_keeps_bounds() {
        let d = Dim::new(1, 4, 12);
        let b = d.to_broadcast();
        assert!(b.is_broadcast());
        assert_eq!(b.min(), 1);
        assert_eq!(b.extent(), 4);
    }
}
