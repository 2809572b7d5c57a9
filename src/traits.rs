//! Common traits and errors for priority queues
//!
//! - [`PriorityQueue`]: the capability set consumers depend on (insert,
//!   extract the minimum, test for emptiness)
//! - [`HeapError`]: failures of the handle-based operations
//!
//! Querying an empty queue is not an error; it yields `None`.

use thiserror::Error;

/// Error type for handle-based heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The new key is not less than the current key
    #[error("new key is not less than current key")]
    PriorityNotDecreased,
    /// The handle is no longer valid (element was removed)
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
}

/// Min-priority-queue capability set
///
/// Algorithms such as shortest-path or spanning-tree searches only need these
/// three operations, so they can be written once and run against any
/// implementation.
///
/// # Example
///
/// ```rust
/// use fibheap::{FibonacciHeap, PriorityQueue};
///
/// fn drain_sorted<Q: PriorityQueue<i32>>(mut queue: Q, input: &[i32]) -> Vec<i32> {
///     for &x in input {
///         queue.insert(x);
///     }
///     let mut out = Vec::new();
///     while let Some(x) = queue.extract_min() {
///         out.push(x);
///     }
///     out
/// }
///
/// assert_eq!(drain_sorted(FibonacciHeap::new(), &[3, 1, 2]), vec![1, 2, 3]);
/// ```
pub trait PriorityQueue<T: Ord> {
    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(1) amortized for Fibonacci heaps, O(log n) for binary heaps.
    fn insert(&mut self, item: T);

    /// Removes and returns the minimum element, or `None` if empty
    fn extract_min(&mut self) -> Option<T>;

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;
}
