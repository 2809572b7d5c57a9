//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//! - O(m) meld, where m is the size of the heap melded in (its nodes are
//!   re-keyed into this heap's arena)
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked list (the root ring) and the children of
//! every node form a ring of their own. The heap keeps a pointer to the minimum
//! root and does all restructuring lazily: insert just adds a root, and roots
//! of equal degree are only linked together (consolidated) after an
//! extraction.
//!
//! Nodes live in a [`NodeArena`]; every link is an arena key, so the cyclic
//! rings involve no shared ownership and dropping the heap is just dropping the
//! arena.

use std::fmt;
use std::mem;

use smallvec::{smallvec, SmallVec};
use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::node::{FibonacciNode, NodeRef, Ring};
use crate::ring;
use crate::storage::{NodeArena, NodeKey};
use crate::traits::{HeapError, PriorityQueue};

/// Extra degree-table slots beyond `floor(log_phi(n))`
pub const DEGREE_TABLE_SLACK: usize = 2;

/// Degree-table slots kept inline during consolidation
const DEGREE_TABLE_INLINE: usize = 64;

/// Upper bound on the degree of any node in a heap of `len` elements, plus slack
///
/// A node of degree d roots a tree of at least F(d+2) >= phi^d nodes, so no
/// degree exceeds `log_phi(len)`.
pub fn degree_bound(len: usize) -> usize {
    if len < 2 {
        return DEGREE_TABLE_SLACK;
    }
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    ((len as f64).ln() / phi.ln()).floor() as usize + DEGREE_TABLE_SLACK
}

/// Handle to an element in a Fibonacci heap
///
/// Obtained from [`FibonacciHeap::push_with_handle`] and used with
/// [`FibonacciHeap::decrease_key`] and [`FibonacciHeap::delete`]. Once the
/// element leaves the heap the handle is rejected with
/// [`HeapError::InvalidHandle`].
///
/// Note: a handle is tied to the heap that issued it (and to clones of that
/// heap). Using it with another heap is memory safe but may address an
/// unrelated element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibheap::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32> = [2, 5, 4, 1, 3].into_iter().collect();
/// assert_eq!(heap.get_min(), Some(&1));
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.get_min(), Some(&2));
///
/// let handle = heap.push_with_handle(10);
/// heap.decrease_key(&handle, 0).unwrap();
/// assert_eq!(heap.extract_min(), Some(0));
/// ```
#[derive(Clone)]
pub struct FibonacciHeap<T> {
    pub(crate) nodes: NodeArena<FibonacciNode<T>>,
    pub(crate) min: Option<NodeKey>,
    pub(crate) len: usize,
}

impl<T> Default for FibonacciHeap<T> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::new(),
            min: None,
            len: 0,
        }
    }
}

impl<T> FibonacciHeap<T> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with arena space for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            min: None,
            len: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of elements, same as [`len`](Self::len)
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns the minimum element without removing it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn get_min(&self) -> Option<&T> {
        self.min.map(|min| &self.nodes[min].key)
    }

    /// View of the minimum root, for inspecting the forest
    pub fn min_node(&self) -> Option<NodeRef<'_, T>> {
        self.min.map(|min| NodeRef::new(&self.nodes, min))
    }

    /// Walks the root ring starting at the minimum root
    pub fn roots(&self) -> Ring<'_, T> {
        Ring::new(&self.nodes, self.min)
    }

    /// Iterates over all elements in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.values().map(|node| &node.key)
    }

    /// Removes every element; outstanding handles become invalid
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }
}

impl<T: Ord> FibonacciHeap<T> {
    /// Creates a heap holding a single element
    pub fn singleton(item: T) -> Self {
        let mut heap = Self::new();
        heap.insert(item);
        heap
    }

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, item: T) {
        self.push_with_handle(item);
    }

    /// Inserts an element, returning a handle for `decrease_key` and `delete`
    pub fn push_with_handle(&mut self, item: T) -> FibonacciHandle {
        let node = self
            .nodes
            .insert_with_key(|id| FibonacciNode::new(id, item));
        self.add_root(node);
        self.len += 1;
        FibonacciHandle { node }
    }

    /// Returns the element behind a handle, if it is still in the heap
    pub fn get(&self, handle: &FibonacciHandle) -> Option<&T> {
        self.nodes.get(handle.node).map(|node| &node.key)
    }

    /// Removes and returns the minimum element
    ///
    /// The children of the minimum become roots, then roots of equal degree
    /// are linked until every root degree is distinct.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Option<T> {
        let min = self.min?;
        self.remove_root(min);
        self.len -= 1;
        let node = self.nodes.remove(min);
        debug_assert!(node.is_some(), "minimum root missing from arena");
        node.map(|node| node.key)
    }

    /// Lowers the key of the element behind `handle`
    ///
    /// If the node now violates heap order it is cut from its parent and
    /// becomes a root; the parent is then marked, or cut as well if it was
    /// already marked, and so on up the tree (cascading cut).
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the element already left the heap
    /// - [`HeapError::PriorityNotDecreased`] if `new_key` is not strictly less
    ///   than the current key; the heap is left unchanged
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: T) -> Result<(), HeapError> {
        let id = handle.node;
        let node = self.nodes.get_mut(id).ok_or(HeapError::InvalidHandle)?;
        if new_key >= node.key {
            return Err(HeapError::PriorityNotDecreased);
        }
        node.key = new_key;
        let parent = node.parent;

        match parent {
            Some(parent) => {
                if self.nodes[id].key < self.nodes[parent].key {
                    self.cut(id, parent);
                    self.cascading_cut(parent);
                }
            }
            None => {
                if let Some(min) = self.min {
                    if self.nodes[id].key < self.nodes[min].key {
                        self.min = Some(id);
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes the element behind `handle` and returns it
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element already left the heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<T, HeapError> {
        let id = handle.node;
        let parent = self.nodes.get(id).ok_or(HeapError::InvalidHandle)?.parent;
        if let Some(parent) = parent {
            self.cut(id, parent);
            self.cascading_cut(parent);
        }
        self.remove_root(id);
        self.len -= 1;
        self.nodes
            .remove(id)
            .map(|node| node.key)
            .ok_or(HeapError::InvalidHandle)
    }

    /// Moves every element of `other` into this heap
    ///
    /// The two root rings are concatenated; nothing is consolidated. Handles
    /// issued by `other` are invalidated, and handles whose elements already
    /// left this heap stay invalid.
    ///
    /// # Time Complexity
    /// O(other.len()): the other arena's nodes are re-keyed into this one.
    pub fn meld(&mut self, mut other: Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };

        // Nodes always move into this arena, even when it is empty, so keys
        // freed here earlier keep their stale generation
        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(other.len);
        let mut moved: Vec<NodeKey> = Vec::with_capacity(other.len);
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for &id in &moved {
            let node = &mut self.nodes[id];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        let other_min = remap[other_min];
        match self.min {
            None => self.min = Some(other_min),
            Some(self_min) => {
                ring::splice(&mut self.nodes, self_min, other_min);
                if self.nodes[other_min].key < self.nodes[self_min].key {
                    self.min = Some(other_min);
                }
            }
        }
        debug!(added = other.len, len = self.len + other.len, "melded heaps");
        self.len += mem::take(&mut other.len);
    }

    /// Consumes the heap, returning its elements in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        while let Some(item) = self.extract_min() {
            out.push(item);
        }
        out
    }

    /// Adds a singleton, parentless node to the root ring
    fn add_root(&mut self, node: NodeKey) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                ring::insert_before(&mut self.nodes, min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Detaches the root `root` from the forest, leaving it in the arena
    ///
    /// Its children are promoted to the root ring first. If other roots
    /// remain they are consolidated and the minimum recomputed.
    fn remove_root(&mut self, root: NodeKey) {
        debug_assert!(self.nodes[root].parent.is_none(), "removing a non-root");

        if let Some(child) = self.nodes[root].child.take() {
            let mut current = child;
            loop {
                let node = &mut self.nodes[current];
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            self.nodes[root].degree = 0;
            ring::splice(&mut self.nodes, root, child);
        }

        match ring::remove(&mut self.nodes, root) {
            None => self.min = None,
            Some(next) => {
                self.min = Some(next);
                self.consolidate(next);
            }
        }
    }

    /// Links roots of equal degree until all root degrees are distinct
    fn consolidate(&mut self, start: NodeKey) {
        // The ring is restructured while we walk it, so walk a copy
        let roots = ring::snapshot(&self.nodes, start);
        let mut table: SmallVec<[Option<NodeKey>; DEGREE_TABLE_INLINE]> =
            smallvec![None; degree_bound(self.len)];
        let mut links = 0usize;

        for &root in &roots {
            let mut x = root;
            let mut d = self.nodes[x].degree;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else {
                    break;
                };
                // Ties: the root already in the table absorbs
                if self.nodes[x].key >= self.nodes[y].key {
                    mem::swap(&mut x, &mut y);
                }
                self.link(x, y);
                links += 1;
                d += 1;
            }
            table[d] = Some(x);
        }

        let mut min: Option<NodeKey> = None;
        let mut remaining = 0usize;
        for &root in table.iter().flatten() {
            remaining += 1;
            match min {
                Some(m) if self.nodes[m].key <= self.nodes[root].key => {}
                _ => min = Some(root),
            }
        }
        self.min = min;

        trace!(
            roots_before = roots.len(),
            roots_after = remaining,
            links,
            "consolidated root ring"
        );
    }

    /// Makes `child` (a root) a child of `parent` (a root)
    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        ring::remove(&mut self.nodes, child);
        match self.nodes[parent].child {
            Some(head) => ring::insert_before(&mut self.nodes, head, child),
            None => self.nodes[parent].child = Some(child),
        }
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;
        self.nodes[parent].degree += 1;
    }

    /// Moves `node` from the child ring of `parent` to the root ring
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let next = ring::remove(&mut self.nodes, node);
        let p = &mut self.nodes[parent];
        if p.child == Some(node) {
            p.child = next;
        }
        p.degree -= 1;

        let n = &mut self.nodes[node];
        n.parent = None;
        n.marked = false;
        self.add_root(node);
    }

    /// Marks `node`, or cuts it and continues with its parent if already marked
    fn cascading_cut(&mut self, mut node: NodeKey) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }
        if cuts > 0 {
            trace!(cuts, "cascading cut");
        }
    }
}

impl<T: Ord> PriorityQueue<T> for FibonacciHeap<T> {
    fn insert(&mut self, item: T) {
        self.insert(item)
    }

    fn extract_min(&mut self) -> Option<T> {
        self.extract_min()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for FibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min.map(|min| &self.nodes[min].key))
            .finish()
    }
}

impl<T: Ord> FromIterator<T> for FibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for FibonacciHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> From<Vec<T>> for FibonacciHeap<T> {
    fn from(items: Vec<T>) -> Self {
        let mut heap = Self::with_capacity(items.len());
        heap.extend(items);
        heap
    }
}

/// Consuming iterator yielding elements in ascending order
pub struct IntoIter<T: Ord> {
    heap: FibonacciHeap<T>,
}

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.extract_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len, Some(self.heap.len))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}

impl<T: Ord> std::iter::FusedIterator for IntoIter<T> {}

impl<T: Ord> IntoIterator for FibonacciHeap<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { heap: self }
    }
}
