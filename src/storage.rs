//! Arena storage for heap nodes
//!
//! Every node of a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) lives in a
//! [`NodeArena`], a thin wrapper around [`slotmap::SlotMap`]. The arena is the
//! only owner of node data. Sibling, parent and child relations are plain
//! [`NodeKey`] values that can be copied freely, so the circular sibling rings
//! never form ownership cycles.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than boxed nodes)
//! - Generational keys detect stale references: a key whose node was removed
//!   no longer resolves, even if the slot has been reused
//! - Dropping the arena drops every node without walking the rings

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable index of a node inside a [`NodeArena`]
    pub struct NodeKey;
}

/// SlotMap-based node arena
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Stores a node, returning the key that refers to it
    #[inline]
    pub fn insert(&mut self, node: N) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Stores a node built from its own key
    ///
    /// Used when the node has to point at itself from the start, e.g. a
    /// singleton ring.
    #[inline]
    pub fn insert_with_key(&mut self, f: impl FnOnce(NodeKey) -> N) -> NodeKey {
        self.nodes.insert_with_key(f)
    }

    /// Removes a node, returning it if the key was still live
    #[inline]
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every node
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Iterates over live nodes in storage order (unrelated to heap order)
    pub fn values(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.values()
    }

    /// Iterates over live nodes with their keys in storage order
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &N)> + '_ {
        self.nodes.iter()
    }

    /// Removes and yields every node; the arena is empty afterwards
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeKey, N)> + '_ {
        self.nodes.drain()
    }
}

/// Indexing panics on a stale key. The heap only indexes with keys it
/// reached through live links, so a panic here means corrupted structure.
impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena: NodeArena<i32> = NodeArena::new();

        let key = arena.insert(42);
        assert_eq!(arena.get(key), Some(&42));
        assert_eq!(arena.len(), 1);

        *arena.get_mut(key).unwrap() = 100;
        assert_eq!(arena[key], 100);

        arena[key] += 1;
        assert_eq!(arena.remove(key), Some(101));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_stale_key_does_not_resolve() {
        let mut arena: NodeArena<i32> = NodeArena::new();

        let key = arena.insert(42);
        assert_eq!(arena.get(key), Some(&42));
        assert_eq!(arena.remove(key), Some(42));

        // The freed slot is reused, but the old key has a stale generation
        let reused = arena.insert(7);
        assert_eq!(arena.get(key), None);
        assert_eq!(arena.remove(key), None);
        assert_eq!(arena.get(reused), Some(&7));
    }

    #[test]
    fn test_insert_with_key_sees_own_key() {
        let mut arena: NodeArena<NodeKey> = NodeArena::new();
        let key = arena.insert_with_key(|k| k);
        assert_eq!(arena[key], key);
    }

    #[test]
    fn test_drain_empties_arena() {
        let mut arena: NodeArena<i32> = NodeArena::with_capacity(4);
        for i in 0..4 {
            arena.insert(i);
        }

        let mut drained: Vec<i32> = arena.drain().map(|(_, v)| v).collect();
        drained.sort();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(arena.is_empty());
    }
}
