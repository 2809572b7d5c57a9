//! Circular doubly-linked ring primitives over arena keys
//!
//! In a circular ring:
//! - A single node points to itself (both `left` and `right`)
//! - There is no head or tail, any member can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so walkers must remember where they started
//!
//! All operations here are O(1) except [`snapshot`]. None of them touch
//! `parent`, `child` or `degree`; keeping those consistent is the heap's job.

use smallvec::SmallVec;

use crate::node::FibonacciNode;
use crate::storage::{NodeArena, NodeKey};

/// Inline capacity of a ring snapshot before it spills to the heap
pub(crate) const SNAPSHOT_INLINE: usize = 32;

pub(crate) type Snapshot = SmallVec<[NodeKey; SNAPSHOT_INLINE]>;

/// Makes `node` a ring of one element
#[inline]
pub(crate) fn make_circular<T>(arena: &mut NodeArena<FibonacciNode<T>>, node: NodeKey) {
    let n = &mut arena[node];
    n.left = node;
    n.right = node;
}

/// Inserts the singleton `new` immediately to the left of `at`
#[inline]
pub(crate) fn insert_before<T>(arena: &mut NodeArena<FibonacciNode<T>>, at: NodeKey, new: NodeKey) {
    debug_assert_eq!(arena[new].right, new, "inserted node must be a singleton");
    let prev = arena[at].left;
    arena[new].left = prev;
    arena[new].right = at;
    arena[prev].right = new;
    arena[at].left = new;
}

/// Takes `node` out of its ring and leaves it as a singleton
///
/// Returns the former right neighbour, or `None` if `node` was alone.
#[inline]
pub(crate) fn remove<T>(arena: &mut NodeArena<FibonacciNode<T>>, node: NodeKey) -> Option<NodeKey> {
    let (left, right) = {
        let n = &arena[node];
        (n.left, n.right)
    };
    if right == node {
        return None;
    }
    arena[left].right = right;
    arena[right].left = left;
    make_circular(arena, node);
    Some(right)
}

/// Joins two disjoint rings into one
///
/// The members of `b`'s ring end up immediately to the left of `a`, in their
/// original order.
#[inline]
pub(crate) fn splice<T>(arena: &mut NodeArena<FibonacciNode<T>>, a: NodeKey, b: NodeKey) {
    let a_left = arena[a].left;
    let b_left = arena[b].left;
    arena[a_left].right = b;
    arena[b].left = a_left;
    arena[b_left].right = a;
    arena[a].left = b_left;
}

/// Copies the membership of the ring containing `start`, in `right` order
///
/// Callers that restructure a ring while walking it iterate the copy instead.
pub(crate) fn snapshot<T>(arena: &NodeArena<FibonacciNode<T>>, start: NodeKey) -> Snapshot {
    let mut members = Snapshot::new();
    let mut current = start;
    loop {
        members.push(current);
        current = arena[current].right;
        if current == start {
            break;
        }
    }
    members
}
