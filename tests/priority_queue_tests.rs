//! Consumers written against the `PriorityQueue` capability set
//!
//! Shortest-path and spanning-tree routines only use insert, extract_min and
//! is_empty, so they must give identical answers with the Fibonacci heap and
//! with the standard library's binary heap.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fibheap::{FibonacciHeap, PriorityQueue};
use rstest::rstest;
use rustc_hash::FxHashMap;

/// Undirected weighted graph as adjacency lists
#[derive(Default)]
struct Graph {
    adjacency: FxHashMap<u32, Vec<(u32, u64)>>,
}

impl Graph {
    fn from_edges(edges: &[(u32, u32, u64)]) -> Self {
        let mut graph = Graph::default();
        for &(a, b, w) in edges {
            graph.adjacency.entry(a).or_default().push((b, w));
            graph.adjacency.entry(b).or_default().push((a, w));
        }
        graph
    }

    fn neighbours(&self, node: u32) -> &[(u32, u64)] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Lazy Dijkstra: stale queue entries are skipped instead of decreased
fn shortest_paths<Q: PriorityQueue<(u64, u32)>>(
    graph: &Graph,
    source: u32,
    mut queue: Q,
) -> FxHashMap<u32, u64> {
    let mut dist: FxHashMap<u32, u64> = FxHashMap::default();
    queue.insert((0, source));
    while !queue.is_empty() {
        let Some((d, node)) = queue.extract_min() else {
            break;
        };
        if dist.contains_key(&node) {
            continue;
        }
        dist.insert(node, d);
        for &(next, w) in graph.neighbours(node) {
            if !dist.contains_key(&next) {
                queue.insert((d + w, next));
            }
        }
    }
    dist
}

/// Lazy Prim: total weight of the spanning tree of the component of `start`
fn spanning_tree_weight<Q: PriorityQueue<(u64, u32)>>(graph: &Graph, start: u32, mut queue: Q) -> u64 {
    let mut in_tree: FxHashMap<u32, ()> = FxHashMap::default();
    let mut total = 0;
    queue.insert((0, start));
    while let Some((w, node)) = queue.extract_min() {
        if in_tree.insert(node, ()).is_some() {
            continue;
        }
        total += w;
        for &(next, weight) in graph.neighbours(node) {
            if !in_tree.contains_key(&next) {
                queue.insert((weight, next));
            }
        }
    }
    total
}

fn grid_graph(side: u32) -> Graph {
    let mut edges = Vec::new();
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            let weight = |a: u32, b: u32| ((a * 31 + b * 17) % 13 + 1) as u64;
            if x + 1 < side {
                edges.push((id, id + 1, weight(id, id + 1)));
            }
            if y + 1 < side {
                edges.push((id, id + side, weight(id, id + side)));
            }
        }
    }
    Graph::from_edges(&edges)
}

#[test]
fn test_shortest_paths_small_graph() {
    let graph = Graph::from_edges(&[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 1), (2, 3, 5)]);
    let dist = shortest_paths(&graph, 0, FibonacciHeap::new());

    assert_eq!(dist[&0], 0);
    assert_eq!(dist[&2], 1);
    assert_eq!(dist[&1], 3);
    assert_eq!(dist[&3], 4);
}

#[test]
fn test_unreachable_nodes_are_absent() {
    let graph = Graph::from_edges(&[(0, 1, 1), (5, 6, 1)]);
    let dist = shortest_paths(&graph, 0, FibonacciHeap::new());
    assert_eq!(dist.len(), 2);
    assert!(!dist.contains_key(&5));
}

#[rstest]
#[case(3)]
#[case(10)]
#[case(25)]
fn test_shortest_paths_agree_with_binary_heap(#[case] side: u32) {
    let graph = grid_graph(side);
    let fib = shortest_paths(&graph, 0, FibonacciHeap::new());
    let bin = shortest_paths(&graph, 0, BinaryHeap::<Reverse<(u64, u32)>>::new());

    assert_eq!(fib.len(), (side * side) as usize);
    assert_eq!(fib, bin);
}

#[rstest]
#[case(3)]
#[case(10)]
#[case(25)]
fn test_spanning_tree_agrees_with_binary_heap(#[case] side: u32) {
    let graph = grid_graph(side);
    let fib = spanning_tree_weight(&graph, 0, FibonacciHeap::new());
    let bin = spanning_tree_weight(&graph, 0, BinaryHeap::<Reverse<(u64, u32)>>::new());
    assert_eq!(fib, bin);
}

#[test]
fn test_spanning_tree_known_weight() {
    // Square with one diagonal; the tree takes 1 + 2 + 3
    let graph = Graph::from_edges(&[(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 0, 4), (0, 2, 5)]);
    assert_eq!(spanning_tree_weight(&graph, 0, FibonacciHeap::new()), 6);
}
