//! Structural invariant checking
//!
//! [`FibonacciHeap::validate`] walks the whole forest and reports the first
//! broken invariant it finds. A failure always means a bug in the heap, never
//! bad input, so library code does not call it on the hot path; tests do,
//! after every mutation.
//!
//! Invariants checked:
//! - every ring is circular and `left` is the exact inverse of `right`
//! - every member of a child ring points back at the ring's owner, roots have
//!   no parent
//! - a node's degree equals the size of its child ring
//! - heap order: parent key <= child key
//! - the minimum pointer is a root and no root is smaller
//! - roots are unmarked
//! - no node is reachable twice, and the reachable count equals both the
//!   recorded length and the number of nodes in the arena
//!
//! The walk is iterative (explicit stack) and every ring walk is bounded by
//! the arena size, so a corrupted ring cannot loop forever.

use slotmap::SecondaryMap;
use thiserror::Error;

use crate::fibonacci::FibonacciHeap;
use crate::storage::NodeKey;

/// A broken structural invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("link to {0:?} does not resolve to a live node")]
    DanglingLink(NodeKey),
    #[error("ring starting at {start:?} does not close within {limit} steps")]
    RingNotClosed { start: NodeKey, limit: usize },
    #[error("{node:?}.right.left is not {node:?}")]
    LinkNotInverse { node: NodeKey },
    #[error("{node:?} has parent {actual:?}, expected {expected:?}")]
    ParentMismatch {
        node: NodeKey,
        expected: Option<NodeKey>,
        actual: Option<NodeKey>,
    },
    #[error("{node:?} has degree {degree} but {children} children")]
    DegreeMismatch {
        node: NodeKey,
        degree: usize,
        children: usize,
    },
    #[error("child {child:?} has a smaller key than its parent {parent:?}")]
    HeapOrder { parent: NodeKey, child: NodeKey },
    #[error("minimum pointer {0:?} is not in the root ring")]
    MinNotRoot(NodeKey),
    #[error("root {root:?} has a smaller key than the minimum")]
    MinNotMinimal { root: NodeKey },
    #[error("root {0:?} is marked")]
    MarkedRoot(NodeKey),
    #[error("{0:?} is reachable more than once")]
    SharedNode(NodeKey),
    #[error("heap has no minimum but records {len} elements")]
    EmptyWithElements { len: usize },
    #[error("{reachable} nodes reachable, len is {len}, arena holds {stored}")]
    CountMismatch {
        reachable: usize,
        len: usize,
        stored: usize,
    },
}

impl<T: Ord> FibonacciHeap<T> {
    /// Checks every structural invariant of the heap
    ///
    /// # Errors
    /// The first [`InvariantViolation`] found.
    ///
    /// # Time Complexity
    /// O(n)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            if self.len != 0 || !self.nodes.is_empty() {
                return Err(InvariantViolation::EmptyWithElements { len: self.len });
            }
            return Ok(());
        };

        let mut seen: SecondaryMap<NodeKey, ()> = SecondaryMap::with_capacity(self.len);
        let roots = self.check_ring(min, None, &mut seen)?;

        for &root in &roots {
            if self.nodes[root].marked {
                return Err(InvariantViolation::MarkedRoot(root));
            }
            if self.nodes[root].key < self.nodes[min].key {
                return Err(InvariantViolation::MinNotMinimal { root });
            }
        }

        let mut stack = roots;
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let children = match node.child {
                Some(child) => self.check_ring(child, Some(id), &mut seen)?,
                None => Vec::new(),
            };
            if children.len() != node.degree {
                return Err(InvariantViolation::DegreeMismatch {
                    node: id,
                    degree: node.degree,
                    children: children.len(),
                });
            }
            for &child in &children {
                if self.nodes[child].key < node.key {
                    return Err(InvariantViolation::HeapOrder { parent: id, child });
                }
            }
            stack.extend(children);
        }

        let reachable = seen.len();
        if reachable != self.len || reachable != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                len: self.len,
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// True if no two roots share a degree, which holds right after an
    /// extraction that consolidated
    pub fn root_degrees_unique(&self) -> bool {
        let mut degrees: Vec<usize> = self.roots().map(|root| root.degree()).collect();
        let total = degrees.len();
        degrees.sort_unstable();
        degrees.dedup();
        degrees.len() == total
    }

    /// Walks one ring, checking its links and parent pointers
    ///
    /// Returns the members in `right` order. The minimum pointer is only ever
    /// passed in as the start of the root ring, so reaching the start again
    /// also proves the minimum is a root.
    fn check_ring(
        &self,
        start: NodeKey,
        parent: Option<NodeKey>,
        seen: &mut SecondaryMap<NodeKey, ()>,
    ) -> Result<Vec<NodeKey>, InvariantViolation> {
        let limit = self.nodes.len();
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or(InvariantViolation::DanglingLink(current))?;
            if node.parent != parent {
                if parent.is_none() && current == start {
                    return Err(InvariantViolation::MinNotRoot(current));
                }
                return Err(InvariantViolation::ParentMismatch {
                    node: current,
                    expected: parent,
                    actual: node.parent,
                });
            }
            if seen.insert(current, ()).is_some() {
                return Err(InvariantViolation::SharedNode(current));
            }
            members.push(current);

            let right = self
                .nodes
                .get(node.right)
                .ok_or(InvariantViolation::DanglingLink(node.right))?;
            if right.left != current {
                return Err(InvariantViolation::LinkNotInverse { node: current });
            }
            current = node.right;
            if current == start {
                return Ok(members);
            }
            if members.len() >= limit {
                return Err(InvariantViolation::RingNotClosed { start, limit });
            }
        }
    }
}
