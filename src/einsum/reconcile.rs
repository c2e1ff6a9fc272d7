//! Axis reconciliation and iteration-shape composition

use crate::array::{Dim, Shape, STACK_DIMS};
use crate::einsum::operand::{Axes, Operand, Output};
use crate::element::Element;
use crate::error::{Error, Result, Source};
use smallvec::SmallVec;

/// Descriptors gathered for one label, tagged with who contributed them.
type Contributions = SmallVec<[(Dim, Source); STACK_DIMS]>;

/// Merge the descriptors contributed for one label into the descriptor that
/// drives that axis's loop.
///
/// The first contribution is canonical: its bounds govern. When no
/// contribution has a real step, all of them must agree exactly; in every
/// case the canonical range must lie within each contributor's own bounds.
/// A label nobody declares gets a trivial single-coordinate replay axis, so
/// the iteration shape stays dense up to the maximum label.
fn reconcile(label: usize, contribs: &Contributions) -> Result<Dim> {
    let Some(&(canonical, canonical_src)) = contribs.first() else {
        return Ok(Dim::broadcast(0, 1));
    };
    if contribs.iter().all(|(d, _)| d.is_broadcast()) {
        for &(d, src) in &contribs[1..] {
            if d != canonical {
                return Err(Error::AxisConflict {
                    label,
                    lhs: canonical_src,
                    rhs: src,
                    lhs_dim: canonical,
                    rhs_dim: d,
                });
            }
        }
    }
    for &(d, src) in &contribs[1..] {
        if !d.in_range(&canonical) {
            return Err(Error::AxisOutOfRange {
                label,
                operand: src,
                required: canonical,
                got: d,
            });
        }
    }
    Ok(canonical)
}

/// Loop rank: one past the maximum label any binding references.
fn loop_rank<T: Element>(output_axes: &Axes, inputs: &[Operand<'_, T>]) -> usize {
    let mut max = output_axes.max_label();
    for op in inputs {
        max = match (max, op.axes().max_label()) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }
    max.map_or(0, |m| m + 1)
}

/// Compose the full iteration shape for an evaluation call.
///
/// Per label, the output's native descriptor is gathered first (its bounds
/// win where present), then each input's descriptor converted to its
/// zero-step replay form, so input views are revisited rather than driving
/// the loop. All labels reconcile before the evaluator writes anything.
pub(crate) fn iteration_shape<T: Element>(
    output: &Output<'_, T>,
    inputs: &[Operand<'_, T>],
) -> Result<Shape> {
    let rank = loop_rank(output.axes(), inputs);
    let mut shape = Shape::with_capacity(rank);
    for label in 0..rank {
        let mut contribs = Contributions::new();
        if let Some(d) = output.dim(label) {
            contribs.push((d, Source::Output));
        }
        for (i, op) in inputs.iter().enumerate() {
            if let Some(d) = op.dim(label) {
                contribs.push((d.to_broadcast(), Source::Input(i)));
            }
        }
        shape.push(reconcile(label, &contribs)?);
    }
    Ok(shape)
}

/// Infer the shape of a summation's result from its inputs
///
/// For each requested label, the first input declaring it contributes the
/// bounds (later inputs are checked for compatibility), and the step is
/// discarded: a freshly allocated result gets its own packed layout. Labels
/// declared by no input become single-coordinate axes. The labels belonging
/// to the result are the caller's to choose; they are never inferred.
///
/// # Example
/// ```
/// use einsumr::array::Array;
/// use einsumr::einsum::{output_shape, Operand};
///
/// let a = Array::<f64>::zeros(&[3, 5]);
/// let b = Array::<f64>::zeros(&[5, 4]);
/// let shape = output_shape(
///     &[
///         Operand::view(a.view(), [0, 2])?,
///         Operand::view(b.view(), [2, 1])?,
///     ],
///     [0, 1],
/// )?;
/// let extents: Vec<usize> = shape.dims().iter().map(|d| d.extent()).collect();
/// assert_eq!(extents, &[3, 4]);
/// # Ok::<(), einsumr::error::Error>(())
/// ```
pub fn output_shape<T: Element>(
    inputs: &[Operand<'_, T>],
    axes: impl Into<Axes>,
) -> Result<Shape> {
    infer_output_shape(inputs, &axes.into())
}

pub(crate) fn infer_output_shape<T: Element>(
    inputs: &[Operand<'_, T>],
    axes: &Axes,
) -> Result<Shape> {
    let mut bounds: SmallVec<[(isize, usize); STACK_DIMS]> = SmallVec::with_capacity(axes.len());
    for &label in axes.iter() {
        let mut contribs = Contributions::new();
        for (i, op) in inputs.iter().enumerate() {
            if let Some(d) = op.dim(label) {
                contribs.push((d, Source::Input(i)));
            }
        }
        let d = reconcile(label, &contribs)?;
        bounds.push((d.min(), d.extent()));
    }
    Ok(Shape::packed(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;

    #[test]
    fn test_skipped_label_gets_dummy() {
        let d = reconcile(3, &Contributions::new()).unwrap();
        assert_eq!(d, Dim::broadcast(0, 1));
    }

    #[test]
    fn test_first_contribution_wins() {
        let mut contribs = Contributions::new();
        contribs.push((Dim::new(0, 3, 1), Source::Output));
        contribs.push((Dim::broadcast(0, 5), Source::Input(0)));
        let d = reconcile(0, &contribs).unwrap();
        assert_eq!(d.extent(), 3);
        assert_eq!(d.stride(), 1);
    }

    #[test]
    fn test_all_broadcast_must_agree() {
        let mut contribs = Contributions::new();
        contribs.push((Dim::broadcast(0, 3), Source::Input(0)));
        contribs.push((Dim::broadcast(0, 4), Source::Input(1)));
        let err = reconcile(2, &contribs).unwrap_err();
        match err {
            Error::AxisConflict { label, lhs, rhs, .. } => {
                assert_eq!(label, 2);
                assert_eq!(lhs, Source::Input(0));
                assert_eq!(rhs, Source::Input(1));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_range_must_contain_canonical() {
        let mut contribs = Contributions::new();
        contribs.push((Dim::new(0, 5, 1), Source::Output));
        contribs.push((Dim::broadcast(0, 3), Source::Input(0)));
        assert!(matches!(
            reconcile(1, &contribs),
            Err(Error::AxisOutOfRange {
                label: 1,
                operand: Source::Input(0),
                ..
            })
        ));
    }

    #[test]
    fn test_wider_second_contribution_accepted() {
        // ordering-sensitive by design: the narrower first binding wins and
        // the wider one is only checked for containment
        let mut contribs = Contributions::new();
        contribs.push((Dim::new(0, 3, 1), Source::Input(0)));
        contribs.push((Dim::new(0, 5, 1), Source::Input(1)));
        assert_eq!(reconcile(0, &contribs).unwrap().extent(), 3);

        let mut reversed = Contributions::new();
        reversed.push((Dim::new(0, 5, 1), Source::Input(0)));
        reversed.push((Dim::new(0, 3, 1), Source::Input(1)));
        assert!(reconcile(0, &reversed).is_err());
    }

    #[test]
    fn test_inferred_shape_drops_steps() {
        let a = Array::<f64>::zeros(&[4, 6]);
        // transposed labels: label 0 is the second axis (stride 1, extent 6)
        let shape = output_shape(&[Operand::view(a.view(), [1, 0]).unwrap()], [0, 1]).unwrap();
        assert_eq!(shape.dims()[0].extent(), 6);
        assert_eq!(shape.dims()[1].extent(), 4);
        // packed fresh: row-major over the inferred extents
        assert_eq!(shape.dims()[0].stride(), 4);
        assert_eq!(shape.dims()[1].stride(), 1);
    }

    #[test]
    fn test_inferred_shape_dummy_label() {
        let a = Array::<f64>::zeros(&[2]);
        let shape = output_shape(&[Operand::view(a.view(), [1]).unwrap()], [0, 1]).unwrap();
        assert_eq!(shape.dims()[0].extent(), 1);
        assert_eq!(shape.dims()[1].extent(), 2);
    }
}
