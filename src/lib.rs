//! Arena-backed Fibonacci heap
//!
//! This crate provides a Fibonacci heap: a mergeable min-priority queue with
//! O(1) amortized insert and O(log n) amortized extract-min. Trees of the heap
//! are kept in circular doubly-linked sibling rings, restructured lazily by a
//! consolidation pass after each extraction.
//!
//! # Features
//!
//! - **Core**: `insert`, `get_min`, `extract_min`, `is_empty`, `size`
//! - **Handles**: `push_with_handle`, then `decrease_key` (O(1) amortized, with
//!   cascading cuts) and `delete`
//! - **Meld**: union of two heaps
//! - **Inspection**: `min_node`/`roots` cursors over the forest, and
//!   `validate` to check every structural invariant
//! - **[`PriorityQueue`]**: the capability trait shared with
//!   `BinaryHeap<Reverse<T>>`, for algorithms that only need insert and
//!   extract-min
//!
//! All nodes live in a slotmap arena, so the circular rings hold arena keys
//! instead of owning pointers and the crate contains no `unsafe` code.
//!
//! # Example
//!
//! ```rust
//! use fibheap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5);
//! let handle = heap.push_with_handle(8);
//! heap.insert(3);
//!
//! heap.decrease_key(&handle, 1).unwrap();
//! assert_eq!(heap.get_min(), Some(&1));
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(3));
//! assert_eq!(heap.size(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod fibonacci;
pub mod node;
mod ring;
pub mod stdlib_compat;
pub mod storage;
pub mod traits;
pub mod validate;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use node::{NodeRef, Ring};
pub use storage::NodeKey;
pub use traits::{HeapError, PriorityQueue};
pub use validate::InvariantViolation;
