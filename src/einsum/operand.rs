//! Operand binding: pairing values with their summation axis labels

use crate::array::{ArrayView, ArrayViewMut, Dim, STACK_DIMS};
use crate::element::Element;
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Ordered list of axis labels attached to an operand
///
/// A label is a small non-negative integer naming one axis of the summation
/// index space; operands sharing a label move together along it.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Axes(SmallVec<[usize; STACK_DIMS]>);

impl Axes {
    /// Create an empty label list.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Number of labels.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no labels are declared.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View the labels as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// The largest label declared, if any.
    pub fn max_label(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }
}

impl Deref for Axes {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SmallVec<[usize; STACK_DIMS]>> for Axes {
    fn from(value: SmallVec<[usize; STACK_DIMS]>) -> Self {
        Self(value)
    }
}

impl From<Vec<usize>> for Axes {
    fn from(value: Vec<usize>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl From<&[usize]> for Axes {
    fn from(value: &[usize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Axes {
    fn from(value: [usize; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<usize> for Axes {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The value side of an operand: a view, a callable, or a scalar
enum Accessor<'a, T: Element> {
    View(ArrayView<'a, T>),
    Func(&'a dyn Fn(&[isize]) -> T),
    Scalar(T),
}

/// An input operand: a value paired with its axis labels
///
/// Built by one of the three binders below; consumed by
/// [`einsum`](crate::einsum::einsum) and
/// [`make_einsum`](crate::einsum::make_einsum).
pub struct Operand<'a, T: Element> {
    accessor: Accessor<'a, T>,
    axes: Axes,
}

impl<'a, T: Element> fmt::Debug for Operand<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accessor = match &self.accessor {
            Accessor::View(_) => "View",
            Accessor::Func(_) => "Func",
            Accessor::Scalar(_) => "Scalar",
        };
        f.debug_struct("Operand")
            .field("accessor", &accessor)
            .field("axes", &self.axes)
            .finish()
    }
}

impl<'a, T: Element> Operand<'a, T> {
    /// Bind an array view with one label per axis
    ///
    /// The label count must equal the view's rank. No elements are copied;
    /// the lightweight shape descriptor is.
    pub fn view(view: ArrayView<'a, T>, axes: impl Into<Axes>) -> Result<Self> {
        let axes = axes.into();
        if axes.len() != view.shape().rank() {
            return Err(Error::AxisCountMismatch {
                axes: axes.len(),
                rank: view.shape().rank(),
            });
        }
        Ok(Self {
            accessor: Accessor::View(view),
            axes,
        })
    }

    /// Bind a callable evaluated at each visited coordinate
    ///
    /// The callable receives one coordinate per declared label, in label-list
    /// order. It contributes no dimensions of its own, so the bounds of its
    /// labels must come from other operands or the output; at least one label
    /// is required (a zero-argument callable is a scalar, bind it as one).
    pub fn func(f: &'a dyn Fn(&[isize]) -> T, axes: impl Into<Axes>) -> Result<Self> {
        let axes = axes.into();
        if axes.is_empty() {
            return Err(Error::FuncWithoutAxes);
        }
        Ok(Self {
            accessor: Accessor::Func(f),
            axes,
        })
    }

    /// Bind a scalar, broadcast under every axis
    pub fn scalar(value: T) -> Self {
        Self {
            accessor: Accessor::Scalar(value),
            axes: Axes::new(),
        }
    }

    /// The operand's axis labels
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// The descriptor this operand contributes for a label, if any
    ///
    /// Only view operands contribute dimensions. If the label is declared on
    /// several axes, the first one wins.
    pub(crate) fn dim(&self, label: usize) -> Option<Dim> {
        match &self.accessor {
            Accessor::View(view) => self
                .axes
                .iter()
                .position(|&l| l == label)
                .map(|axis| view.shape().dims()[axis]),
            Accessor::Func(_) | Accessor::Scalar(_) => None,
        }
    }

    /// Evaluate the operand at the projection of `coords` onto its labels
    ///
    /// Coordinates must already be reconciled against this operand's bounds.
    pub(crate) fn eval(&self, coords: &[isize]) -> T {
        match &self.accessor {
            Accessor::View(view) => {
                let mut offset = 0isize;
                for (&label, d) in self.axes.iter().zip(view.shape().dims()) {
                    offset += (coords[label] - d.min()) * d.stride();
                }
                view.as_slice()[offset as usize]
            }
            Accessor::Func(f) => {
                let projected: SmallVec<[isize; STACK_DIMS]> =
                    self.axes.iter().map(|&label| coords[label]).collect();
                f(&projected)
            }
            Accessor::Scalar(value) => *value,
        }
    }
}

/// The output binding of a summation: a mutable view plus its axis labels
///
/// The engine only ever accumulates into it; zero-initializing is the
/// caller's business (or [`make_einsum`](crate::einsum::make_einsum)'s).
pub struct Output<'a, T: Element> {
    view: ArrayViewMut<'a, T>,
    axes: Axes,
}

impl<'a, T: Element> Output<'a, T> {
    /// Bind a mutable array view with one label per axis
    pub fn view(view: ArrayViewMut<'a, T>, axes: impl Into<Axes>) -> Result<Self> {
        let axes = axes.into();
        if axes.len() != view.shape().rank() {
            return Err(Error::AxisCountMismatch {
                axes: axes.len(),
                rank: view.shape().rank(),
            });
        }
        Ok(Self { view, axes })
    }

    /// Bind a single mutable scalar as a rank-0 output
    pub fn scalar(value: &'a mut T) -> Self {
        Self {
            view: ArrayViewMut::scalar(value),
            axes: Axes::new(),
        }
    }

    /// The output's axis labels
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// The descriptor the output contributes for a label, if any
    pub(crate) fn dim(&self, label: usize) -> Option<Dim> {
        self.axes
            .iter()
            .position(|&l| l == label)
            .map(|axis| self.view.shape().dims()[axis])
    }

    /// Add `value` into the cell addressed by projecting `coords`
    pub(crate) fn accumulate(&mut self, coords: &[isize], value: T) {
        let mut offset = 0isize;
        for (&label, d) in self.axes.iter().zip(self.view.shape().dims()) {
            offset += (coords[label] - d.min()) * d.stride();
        }
        let slot = &mut self.view.as_mut_slice()[offset as usize];
        *slot = *slot + value;
    }
}
