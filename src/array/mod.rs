//! Strided arrays, views, and coordinate iteration
//!
//! This module provides the view layer the summation engine drives: per-axis
//! dimension descriptors ([`Dim`]), ordered descriptor sequences ([`Shape`]),
//! owned and borrowed storage ([`Array`], [`ArrayView`], [`ArrayViewMut`]),
//! and the `for_each_index` iteration primitive.

mod alloc;
mod array;
mod dim;
mod iter;
mod shape;

pub use alloc::{Allocator, DefaultAllocator};
pub use array::{Array, ArrayView, ArrayViewMut};
pub use dim::Dim;
pub use iter::for_each_index;
pub use shape::Shape;

pub(crate) use shape::STACK_DIMS;
