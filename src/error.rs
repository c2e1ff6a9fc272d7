//! Error types for einsumr

use crate::array::Dim;
use std::fmt;
use thiserror::Error;

/// Result type alias using einsumr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies which binding of a summation contributed a dimension
/// descriptor: the output, or one of the input operands by call position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The output binding
    Output,
    /// The input operand at this position in the call
    Input(usize),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Output => write!(f, "the output"),
            Source::Input(i) => write!(f, "input {i}"),
        }
    }
}

/// Errors that can occur when binding operands or reconciling axes
///
/// Every variant is a structural contract violation, detected before the
/// evaluation loop writes anything: a failed summation leaves the output
/// storage untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// An operand's axis-label list does not match its view's rank
    #[error("operand declares {axes} axis label(s) but its view has rank {rank}")]
    AxisCountMismatch {
        /// Number of axis labels declared
        axes: usize,
        /// Rank of the bound view
        rank: usize,
    },

    /// A callable operand was bound without any axis labels
    #[error("a callable operand must declare at least one axis label; bind a constant as a scalar instead")]
    FuncWithoutAxes,

    /// Two bindings declare the same axis label with irreconcilable descriptors
    #[error("axis {label}: {lhs} ({lhs_dim}) and {rhs} ({rhs_dim}) disagree")]
    AxisConflict {
        /// The shared axis label
        label: usize,
        /// The binding whose descriptor is canonical for this axis
        lhs: Source,
        /// The binding that disagrees with it
        rhs: Source,
        /// Canonical descriptor
        lhs_dim: Dim,
        /// Conflicting descriptor
        rhs_dim: Dim,
    },

    /// A binding's valid range does not contain the iteration range chosen
    /// for an axis
    #[error("axis {label}: {operand} covers {got}, which does not contain the iteration range {required}")]
    AxisOutOfRange {
        /// The shared axis label
        label: usize,
        /// The binding whose bounds are too narrow
        operand: Source,
        /// Canonical iteration range for the axis
        required: Dim,
        /// The binding's own bounds
        got: Dim,
    },

    /// Storage is the wrong size for the view shape placed over it
    #[error("storage of {got} element(s) cannot back a view requiring {required}")]
    StorageMismatch {
        /// Elements the shape requires
        required: usize,
        /// Elements actually provided
        got: usize,
    },

    /// A borrowed view declared an axis with a negative step
    #[error("axis with negative step cannot be anchored at the start of borrowed storage")]
    NegativeStep,
}

impl Error {
    /// Create a storage mismatch error
    pub(crate) fn storage_mismatch(required: usize, got: usize) -> Self {
        Self::StorageMismatch { required, got }
    }
}
