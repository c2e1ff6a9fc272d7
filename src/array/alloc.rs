//! Storage allocation for owned arrays

use crate::element::Element;

/// Allocator for array storage
///
/// Supplied to the allocating summation entry point so callers can route
/// result buffers through their own memory management (pools, arenas,
/// instrumented allocators).
pub trait Allocator: Clone + Send + Sync {
    /// Allocate `len` elements, each initialized to `init`
    fn allocate<T: Element>(&self, len: usize, init: T) -> Vec<T>;
}

/// Default allocator backed by the global heap
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAllocator;

impl Allocator for DefaultAllocator {
    fn allocate<T: Element>(&self, len: usize, init: T) -> Vec<T> {
        vec![init; len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allocator() {
        fn assert_allocator<A: Allocator>() {}
        assert_allocator::<DefaultAllocator>();

        let buf = DefaultAllocator.allocate(3, 7i64);
        assert_eq!(buf, vec![7, 7, 7]);
    }
}
