//! Coordinate iteration over a shape

use super::shape::{Shape, STACK_DIMS};
use smallvec::SmallVec;

/// Invoke `f` once per coordinate of `shape`
///
/// The first axis varies fastest and the last axis is outermost, so loops
/// over the trailing axes enclose loops over the leading ones. A rank-0
/// shape yields exactly one empty coordinate; a shape with any empty axis
/// yields none.
pub fn for_each_index<F>(shape: &Shape, mut f: F)
where
    F: FnMut(&[isize]),
{
    if shape.dims().iter().any(|d| d.extent() == 0) {
        return;
    }
    let rank = shape.rank();
    let mut coords: SmallVec<[isize; STACK_DIMS]> = shape.dims().iter().map(|d| d.min()).collect();
    loop {
        f(&coords);
        let mut axis = 0;
        loop {
            if axis == rank {
                return;
            }
            coords[axis] += 1;
            if coords[axis] < shape.dims()[axis].end() {
                break;
            }
            coords[axis] = shape.dims()[axis].min();
            axis += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dim;

    #[test]
    fn test_first_axis_fastest() {
        let shape = Shape::contiguous(&[2, 3]);
        let mut visited = Vec::new();
        for_each_index(&shape, |c| visited.push((c[0], c[1])));
        assert_eq!(
            visited,
            vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn test_rank0_visits_once() {
        let mut count = 0;
        for_each_index(&Shape::new(), |c| {
            assert!(c.is_empty());
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_axis_visits_nothing() {
        let shape = Shape::contiguous(&[2, 0, 3]);
        let mut count = 0;
        for_each_index(&shape, |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_respects_min() {
        let shape = Shape::from([Dim::new(-1, 3, 1)]);
        let mut visited = Vec::new();
        for_each_index(&shape, |c| visited.push(c[0]));
        assert_eq!(visited, vec![-1, 0, 1]);
    }
}
