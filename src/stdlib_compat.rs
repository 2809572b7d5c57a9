//! Standard library compatibility layer
//!
//! Implements [`PriorityQueue`] for `std::collections::BinaryHeap<Reverse<T>>`,
//! the usual way to get a min-heap out of the standard library. Code written
//! against [`PriorityQueue`] can then switch between it and
//! [`FibonacciHeap`](crate::FibonacciHeap), and tests use it as a reference.
//!
//! # Example
//!
//! ```rust
//! use std::cmp::Reverse;
//! use std::collections::BinaryHeap;
//! use fibheap::PriorityQueue;
//!
//! let mut heap: BinaryHeap<Reverse<i32>> = BinaryHeap::new();
//! PriorityQueue::insert(&mut heap, 5);
//! PriorityQueue::insert(&mut heap, 3);
//! assert_eq!(PriorityQueue::extract_min(&mut heap), Some(3));
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::traits::PriorityQueue;

impl<T: Ord> PriorityQueue<T> for BinaryHeap<Reverse<T>> {
    fn insert(&mut self, item: T) {
        self.push(Reverse(item));
    }

    fn extract_min(&mut self) -> Option<T> {
        self.pop().map(|Reverse(item)| item)
    }

    fn is_empty(&self) -> bool {
        BinaryHeap::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_heap_is_min_first() {
        let mut heap: BinaryHeap<Reverse<i32>> = BinaryHeap::new();
        for x in [4, 1, 3, 2] {
            PriorityQueue::insert(&mut heap, x);
        }

        let mut out = Vec::new();
        while let Some(x) = PriorityQueue::extract_min(&mut heap) {
            out.push(x);
        }
        assert_eq!(out, vec![1, 2, 3, 4]);
        assert!(PriorityQueue::is_empty(&heap));
    }
}
