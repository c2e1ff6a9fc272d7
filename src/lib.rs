//! # einsumr
//!
//! **Generalized Einstein summation over strided multi-dimensional array views.**
//!
//! einsumr computes, for every coordinate of an output, the sum over all
//! unlabeled axes of the product of operand elements addressed by shared
//! axis labels. The one evaluation strategy expresses traces, dot products,
//! matrix and tensor products, and arbitrary generalized contractions.
//!
//! ## Features
//!
//! - **Label-driven contraction**: integer axis labels tie operand axes
//!   together; labels absent from the output are summed away
//! - **Broadcasting**: scalars, callables, and zero-step view axes replay
//!   values across axes they do not use
//! - **Output inference**: [`make_einsum`](einsum::make_einsum) infers,
//!   allocates, and zero-initializes the output for you
//! - **Fail-fast validation**: label/rank mismatches at bind time, axis
//!   conflicts before the loop runs; a failed call never touches the output
//!
//! ## Quick Start
//!
//! ```
//! use einsumr::prelude::*;
//!
//! // matrix product, labels i = 0, j = 1, k = 2:
//! // ab[i, j] = sum over k of a[i, k] * b[k, j]
//! let a = Array::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2])?;
//! let b = Array::from_slice(&[5.0, 6.0, 7.0, 8.0], &[2, 2])?;
//! let ab = make_einsum(
//!     &[
//!         Operand::view(a.view(), [0, 2])?,
//!         Operand::view(b.view(), [2, 1])?,
//!     ],
//!     [0, 1],
//! )?;
//! assert_eq!(ab.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Scope
//!
//! The engine evaluates the full operand product at every coordinate of the
//! iteration space. It does not reassociate contractions, reorder loops for
//! cache behavior, or compensate summation; it is a low-overhead primitive
//! meant to compose with explicit transformations when those matter.
//! Execution is single-threaded and synchronous.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod array;
pub mod einsum;
pub mod element;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{
        for_each_index, Allocator, Array, ArrayView, ArrayViewMut, DefaultAllocator, Dim, Shape,
    };
    pub use crate::einsum::{einsum, make_einsum, make_einsum_in, output_shape, Axes, Operand, Output};
    pub use crate::element::Element;
    pub use crate::error::{Error, Result, Source};
}
