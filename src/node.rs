//! Fibonacci heap nodes and read-only views of them
//!
//! A [`FibonacciNode`] is plain data: a key, a degree counter, and arena keys
//! for its neighbours. All structural changes go through the heap and its
//! ring primitives.
//!
//! [`NodeRef`] is a borrowed cursor over a heap's forest. It is what callers
//! get from [`FibonacciHeap::min_node`](crate::FibonacciHeap::min_node) and
//! [`FibonacciHeap::roots`](crate::FibonacciHeap::roots), and it is how the
//! tests walk rings to check the structure.

use std::fmt;

use crate::storage::{NodeArena, NodeKey};

/// A node of a Fibonacci heap
///
/// Every node belongs to exactly one circular sibling ring at a time: its own
/// singleton ring, the child ring of its parent, or the heap's root ring.
#[derive(Debug, Clone)]
pub struct FibonacciNode<T> {
    pub(crate) key: T,
    /// Number of nodes in the child ring
    pub(crate) degree: usize,
    /// Non-owning back reference, `None` for roots
    pub(crate) parent: Option<NodeKey>,
    /// Any member of the child ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    /// Lost a child since it last became a child itself
    pub(crate) marked: bool,
}

impl<T> FibonacciNode<T> {
    /// Creates a node that forms a singleton ring
    ///
    /// `this` must be the arena key the node is stored under, which is why the
    /// heap builds nodes through [`NodeArena::insert_with_key`].
    pub fn new(this: NodeKey, key: T) -> Self {
        Self {
            key,
            degree: 0,
            parent: None,
            child: None,
            left: this,
            right: this,
            marked: false,
        }
    }

    #[inline]
    pub fn key(&self) -> &T {
        &self.key
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Borrowed view of one node in a heap
pub struct NodeRef<'a, T> {
    arena: &'a NodeArena<FibonacciNode<T>>,
    id: NodeKey,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<FibonacciNode<T>>, id: NodeKey) -> Self {
        Self { arena, id }
    }

    #[inline]
    fn node(&self) -> &'a FibonacciNode<T> {
        &self.arena[self.id]
    }

    #[inline]
    fn at(&self, id: NodeKey) -> NodeRef<'a, T> {
        NodeRef::new(self.arena, id)
    }

    /// Arena key of this node, stable for as long as the node is in the heap
    #[inline]
    pub fn id(&self) -> NodeKey {
        self.id
    }

    #[inline]
    pub fn key(&self) -> &'a T {
        &self.node().key
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.node().degree
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.node().marked
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent.map(|id| self.at(id))
    }

    /// The entry point of this node's child ring
    pub fn child(&self) -> Option<NodeRef<'a, T>> {
        self.node().child.map(|id| self.at(id))
    }

    pub fn left(&self) -> NodeRef<'a, T> {
        self.at(self.node().left)
    }

    pub fn right(&self) -> NodeRef<'a, T> {
        self.at(self.node().right)
    }

    /// Walks the ring this node belongs to, starting with the node itself
    pub fn siblings(&self) -> Ring<'a, T> {
        Ring::new(self.arena, Some(self.id))
    }

    /// Walks the child ring; empty when the node has no children
    pub fn children(&self) -> Ring<'a, T> {
        Ring::new(self.arena, self.node().child)
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("degree", &self.degree())
            .field("marked", &self.is_marked())
            .finish()
    }
}

/// Iterator over one circular ring, following `right` links
///
/// Stops when it gets back to the node it started from, so each member is
/// yielded exactly once.
pub struct Ring<'a, T> {
    arena: &'a NodeArena<FibonacciNode<T>>,
    start: Option<NodeKey>,
    next: Option<NodeKey>,
}

impl<'a, T> Ring<'a, T> {
    pub(crate) fn new(arena: &'a NodeArena<FibonacciNode<T>>, start: Option<NodeKey>) -> Self {
        Self {
            arena,
            start,
            next: start,
        }
    }
}

impl<'a, T> Iterator for Ring<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let right = self.arena[current].right;
        self.next = if Some(right) == self.start {
            None
        } else {
            Some(right)
        };
        Some(NodeRef::new(self.arena, current))
    }
}

impl<T> std::iter::FusedIterator for Ring<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_singleton_ring() {
        let mut arena = NodeArena::new();
        let id = arena.insert_with_key(|id| FibonacciNode::new(id, 5));

        let node = NodeRef::new(&arena, id);
        assert_eq!(*node.key(), 5);
        assert_eq!(node.degree(), 0);
        assert!(!node.is_marked());
        assert!(node.parent().is_none());
        assert!(node.child().is_none());
        assert_eq!(node.left(), node);
        assert_eq!(node.right(), node);
        assert_eq!(node.siblings().count(), 1);
        assert_eq!(node.children().count(), 0);
    }

    #[test]
    fn test_ring_visits_each_member_once() {
        let mut arena = NodeArena::new();
        let ids: Vec<NodeKey> = (0..3)
            .map(|k| arena.insert_with_key(|id| FibonacciNode::new(id, k)))
            .collect();

        // 0 -> 1 -> 2 -> 0
        for i in 0..3 {
            arena[ids[i]].right = ids[(i + 1) % 3];
            arena[ids[(i + 1) % 3]].left = ids[i];
        }

        let from_middle: Vec<i32> = NodeRef::new(&arena, ids[1])
            .siblings()
            .map(|n| *n.key())
            .collect();
        assert_eq!(from_middle, vec![1, 2, 0]);
    }
}
