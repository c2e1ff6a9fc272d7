//! Generalized Einstein summation over strided views
//!
//! Operands are bound to axis labels with [`Operand::view`],
//! [`Operand::func`], or [`Operand::scalar`]; the output with
//! [`Output::view`] or [`Output::scalar`]. [`einsum`] accumulates into a
//! caller-initialized output; [`make_einsum`] infers the output shape,
//! allocates it zeroed, and returns it.

mod operand;
mod reconcile;

pub use operand::{Axes, Operand, Output};
pub use reconcile::output_shape;

use crate::array::{for_each_index, Allocator, Array, DefaultAllocator};
use crate::element::Element;
use crate::error::Result;

/// Compute an Einstein summation into a caller-provided output
///
/// Each visited coordinate of the iteration space contributes exactly one
/// multiply-accumulate of the full product of all input values into the
/// output cell addressed by the output's labels. Labels shared between
/// bindings move together; labels missing from the output are summed away.
///
/// The output must be initialized to something useful (typically zero)
/// before the call: this function only ever adds into it, which is also what
/// makes repeated calls accumulate.
///
/// The product is evaluated in full at every coordinate; no associative
/// reordering and no partial-sum caching across reduction axes. Axis 0 of
/// the iteration space varies fastest, so giving the reduction axes the
/// highest labels makes them the outermost loops and lets each output cell
/// accumulate across contiguous inner passes.
///
/// All axis reconciliation happens before the loop: on error, the output
/// storage has not been touched.
///
/// # Examples
///
/// ```
/// use einsumr::prelude::*;
///
/// // trace of A: out += A[i, i]
/// let a = Array::from_slice(&[1.0, 2.0, 3.0, 4.0], &[2, 2])?;
/// let mut tr = 0.0;
/// einsum(
///     &[Operand::view(a.view(), [0, 0])?],
///     &mut Output::scalar(&mut tr),
/// )?;
/// assert_eq!(tr, 5.0);
/// # Ok::<(), Error>(())
/// ```
///
/// With labels `i = 0`, `j = 1`, `k = 2`:
/// - dot product: inputs `[x, [0]]`, `[y, [0]]`, output scalar
/// - matrix product: inputs `[a, [0, 2]]`, `[b, [2, 1]]`, output `[0, 1]`
/// - matrix-vector product: inputs `[a, [0, 1]]`, `[x, [1]]`, output `[0]`
pub fn einsum<T: Element>(inputs: &[Operand<'_, T>], output: &mut Output<'_, T>) -> Result<()> {
    let shape = reconcile::iteration_shape(output, inputs)?;
    for_each_index(&shape, |coords| {
        let mut product = T::one();
        for input in inputs {
            product = product * input.eval(coords);
        }
        output.accumulate(coords, product);
    });
    Ok(())
}

/// Compute an Einstein summation into a freshly allocated output
///
/// The output's shape is inferred from the inputs for the requested labels
/// (see [`output_shape`]), allocated zero-initialized, accumulated into, and
/// returned.
///
/// # Example
/// ```
/// use einsumr::prelude::*;
///
/// // outer product: out[i, j] = x[i] * y[j]
/// let x = Array::from_slice(&[1.0, 2.0, 3.0], &[3])?;
/// let y = Array::from_slice(&[4.0, 5.0], &[2])?;
/// let outer = make_einsum(
///     &[Operand::view(x.view(), [0])?, Operand::view(y.view(), [1])?],
///     [0, 1],
/// )?;
/// assert_eq!(outer.as_slice(), &[4.0, 5.0, 8.0, 10.0, 12.0, 15.0]);
/// # Ok::<(), Error>(())
/// ```
pub fn make_einsum<T: Element>(
    inputs: &[Operand<'_, T>],
    axes: impl Into<Axes>,
) -> Result<Array<T>> {
    make_einsum_in(inputs, axes, &DefaultAllocator)
}

/// [`make_einsum`] with output storage from the given allocator
pub fn make_einsum_in<T: Element, A: Allocator>(
    inputs: &[Operand<'_, T>],
    axes: impl Into<Axes>,
    alloc: &A,
) -> Result<Array<T>> {
    let axes = axes.into();
    let shape = reconcile::infer_output_shape(inputs, &axes)?;
    let mut result = Array::from_shape(shape, T::zero(), alloc);
    let mut output = Output::view(result.view_mut(), axes)?;
    einsum(inputs, &mut output)?;
    Ok(result)
}
