use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{Graph, NodeIndex, NodeKey};
use crate::weight::Weight;

/// Queue and relaxation counters for one solve.
///
/// Every pop either finalizes a node or is discarded as stale, so
/// `pops == finalized + stale_skips` and `finalized` equals the number of
/// reachable nodes (start included).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub pushes: usize,
    pub pops: usize,
    pub stale_skips: usize,
    pub finalized: usize,
    /// Edges that improved a tentative distance.
    pub relaxations: usize,
}

/// Output of a single-source solve.
///
/// Both maps hold an entry for every node known to the graph at call time,
/// plus `start`. Unreached nodes have distance [`Weight::INFINITY`] and no
/// predecessor. The maps own their keys and share nothing with the graph.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N, W> {
    pub start: N,
    pub distances: HashMap<N, W>,
    pub predecessors: HashMap<N, Option<N>>,
    pub stats: SolveStats,
}

impl<N: NodeKey, W: Weight> ShortestPaths<N, W> {
    /// Distance to `node`, or None if the node was not part of the solve.
    pub fn distance(&self, node: &N) -> Option<W> {
        self.distances.get(node).copied()
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distance(node).is_some_and(|d| !d.is_infinite())
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.values().filter(|d| !d.is_infinite()).count()
    }

    /// Path from `start` to `target`; empty if there is none.
    pub fn path_to(&self, target: &N) -> Vec<N> {
        reconstruct_path(&self.predecessors, &self.start, target)
    }

    pub fn into_parts(self) -> (HashMap<N, W>, HashMap<N, Option<N>>) {
        (self.distances, self.predecessors)
    }
}

/// Priority queue entry. Ordered so `BinaryHeap` pops the smallest distance
/// first, and among equal distances the smallest node key.
struct QueueEntry<'g, N, W> {
    distance: W,
    key: &'g N,
    node: NodeIndex,
}

impl<N: NodeKey, W: Weight> Ord for QueueEntry<'_, N, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.key.cmp(self.key))
    }
}

impl<N: NodeKey, W: Weight> PartialOrd for QueueEntry<'_, N, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: NodeKey, W: Weight> PartialEq for QueueEntry<'_, N, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: NodeKey, W: Weight> Eq for QueueEntry<'_, N, W> {}

/// Single-source shortest paths (Dijkstra) from `start`.
///
/// Works on a shared borrow of the graph. A `start` the graph does not know
/// is solved as an isolated node: it appears in the result at distance zero
/// and the graph is left untouched (see [`Graph::solve`] for the inserting
/// form).
///
/// There is no decrease-key: an improved distance pushes a new entry, and
/// entries whose distance no longer matches the recorded best are skipped
/// on pop. Equal distances pop in node-key order, and relaxation uses
/// strict `<`, so among equal-length paths the one found first keeps its
/// predecessor.
///
/// Non-negative weights are guaranteed by the graph's insert path and are
/// not re-checked here.
#[tracing::instrument(
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count())
)]
pub fn dijkstra<N: NodeKey, W: Weight>(graph: &Graph<N, W>, start: &N) -> ShortestPaths<N, W> {
    let known = graph.node_count();
    // An unknown start takes the slot one past the last node; edges_at()
    // returns no edges for it.
    let (start_idx, slots) = match graph.index_of(start) {
        Some(idx) => (idx, known),
        None => (known, known + 1),
    };

    let mut dist: Vec<W> = vec![W::INFINITY; slots];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; slots];
    let key_of = |idx: NodeIndex| graph.node_key(idx).unwrap_or(start);
    let mut queue: BinaryHeap<QueueEntry<'_, N, W>> = BinaryHeap::new();
    let mut stats = SolveStats::default();

    dist[start_idx] = W::ZERO;
    queue.push(QueueEntry {
        distance: W::ZERO,
        key: start,
        node: start_idx,
    });
    stats.pushes += 1;

    while let Some(QueueEntry { distance, node, .. }) = queue.pop() {
        stats.pops += 1;

        // Superseded by a later, shorter push for the same node
        if distance != dist[node] {
            stats.stale_skips += 1;
            continue;
        }
        stats.finalized += 1;

        for edge in graph.edges_at(node) {
            let alt = distance.accumulate(edge.weight);
            if alt < dist[edge.target] {
                dist[edge.target] = alt;
                prev[edge.target] = Some(node);
                queue.push(QueueEntry {
                    distance: alt,
                    key: key_of(edge.target),
                    node: edge.target,
                });
                stats.pushes += 1;
                stats.relaxations += 1;
            }
        }
    }

    tracing::debug!(
        pushes = stats.pushes,
        pops = stats.pops,
        stale_skips = stats.stale_skips,
        finalized = stats.finalized,
        "dijkstra complete"
    );

    let mut distances = HashMap::with_capacity(slots);
    let mut predecessors = HashMap::with_capacity(slots);
    for idx in 0..slots {
        let key = key_of(idx);
        distances.insert(key.clone(), dist[idx]);
        predecessors.insert(key.clone(), prev[idx].map(|p| key_of(p).clone()));
    }

    ShortestPaths {
        start: start.clone(),
        distances,
        predecessors,
        stats,
    }
}

/// Walk predecessor links back from `target` to `start`.
///
/// Returns the nodes in forward order (`start` .. `target`), `[start]` when
/// `start == target`, or an empty Vec when the chain ends without reaching
/// `start`. A chain longer than the map (a cycle in inconsistent input) is
/// also reported as empty.
pub fn reconstruct_path<N: NodeKey>(
    predecessors: &HashMap<N, Option<N>>,
    start: &N,
    target: &N,
) -> Vec<N> {
    if start == target {
        return vec![start.clone()];
    }

    let mut path = vec![target.clone()];
    let mut current = target;

    while let Some(Some(parent)) = predecessors.get(current) {
        path.push(parent.clone());
        if parent == start {
            path.reverse();
            return path;
        }
        if path.len() > predecessors.len() {
            tracing::debug!(?start, ?target, "predecessor chain does not terminate");
            break;
        }
        current = parent;
    }

    Vec::new()
}

/// Shortest path from `start` to `target`: total distance and node sequence.
///
/// Returns None if `target` is unreachable or unknown.
pub fn shortest_path<N: NodeKey, W: Weight>(
    graph: &Graph<N, W>,
    start: &N,
    target: &N,
) -> Option<(W, Vec<N>)> {
    let result = dijkstra(graph, start);
    let distance = result.distance(target).filter(|d| !d.is_infinite())?;
    let path = result.path_to(target);
    if path.is_empty() {
        return None;
    }
    Some((distance, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The undirected A–F graph from the reference run.
    fn sample_graph() -> Graph<&'static str> {
        let mut g = Graph::new();
        for (a, b, w) in [
            ("A", "B", 4.0),
            ("A", "C", 2.0),
            ("B", "C", 1.0),
            ("B", "D", 5.0),
            ("C", "D", 8.0),
            ("C", "E", 10.0),
            ("D", "E", 2.0),
            ("D", "F", 6.0),
            ("E", "F", 3.0),
        ] {
            g.add_undirected_edge(a, b, w).unwrap();
        }
        g
    }

    fn chain(n: u64) -> Graph<u64, u64> {
        let mut g = Graph::new();
        g.load_edges((0..n - 1).map(|i| (i, i + 1, 1))).unwrap();
        g
    }

    // --- Solver tests ---

    #[test]
    fn test_sample_graph_distances() {
        let g = sample_graph();
        let result = dijkstra(&g, &"A");
        let expected = [
            ("A", 0.0),
            ("B", 3.0),
            ("C", 2.0),
            ("D", 8.0),
            ("E", 10.0),
            ("F", 13.0),
        ];
        for (node, d) in expected {
            assert_eq!(result.distance(&node), Some(d), "distance to {}", node);
        }
        assert_eq!(result.distances.len(), 6);
        assert_eq!(result.predecessors.len(), 6);
    }

    #[test]
    fn test_sample_graph_predecessors() {
        let g = sample_graph();
        let result = dijkstra(&g, &"A");
        assert_eq!(result.predecessors[&"A"], None);
        assert_eq!(result.predecessors[&"C"], Some("A"));
        assert_eq!(result.predecessors[&"B"], Some("C"));
        assert_eq!(result.predecessors[&"D"], Some("B"));
        assert_eq!(result.predecessors[&"E"], Some("D"));
        assert_eq!(result.predecessors[&"F"], Some("E"));
    }

    #[test]
    fn test_sample_graph_path_a_to_f() {
        let g = sample_graph();
        let result = dijkstra(&g, &"A");
        assert_eq!(result.path_to(&"F"), vec!["A", "C", "B", "D", "E", "F"]);
        assert_eq!(result.path_to(&"B"), vec!["A", "C", "B"]);
        assert_eq!(result.path_to(&"A"), vec!["A"]);
    }

    #[test]
    fn test_unreachable_node() {
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_edge("C", "A", 1.0).unwrap();
        g.add_node("Z");

        let result = dijkstra(&g, &"A");
        assert_eq!(result.distance(&"B"), Some(1.0));
        // Directed: C -> A does not make C reachable from A
        assert_eq!(result.distance(&"C"), Some(f64::INFINITY));
        assert_eq!(result.distance(&"Z"), Some(f64::INFINITY));
        assert_eq!(result.predecessors[&"C"], None);
        assert_eq!(result.predecessors[&"Z"], None);
        assert!(!result.is_reachable(&"Z"));
        assert!(result.path_to(&"Z").is_empty());
        assert_eq!(result.reachable_count(), 2);
    }

    #[test]
    fn test_start_not_in_graph() {
        let g = chain(3);
        let result = dijkstra(&g, &99);
        assert_eq!(result.distance(&99), Some(0));
        assert_eq!(result.predecessors[&99], None);
        assert_eq!(result.distances.len(), 4);
        assert!(result.distances.iter().all(|(&n, &d)| n == 99 || d == u64::MAX));
        // Shared-borrow solve leaves the graph alone
        assert!(!g.contains_node(&99));
    }

    #[test]
    fn test_solve_inserts_missing_start() {
        let mut g = chain(3);
        let result = g.solve(42);
        assert!(g.contains_node(&42));
        assert_eq!(g.node_count(), 4);
        assert_eq!(result.distance(&42), Some(0));
        assert_eq!(result.reachable_count(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<&str> = Graph::new();
        let result = dijkstra(&g, &"A");
        assert_eq!(result.distances.len(), 1);
        assert_eq!(result.distance(&"A"), Some(0.0));
        assert_eq!(result.predecessors[&"A"], None);
        assert_eq!(result.stats.finalized, 1);
    }

    #[test]
    fn test_start_distance_zero_with_self_loop() {
        let mut g: Graph<u64, u32> = Graph::new();
        g.add_edge(0, 0, 5).unwrap();
        g.add_edge(0, 1, 2).unwrap();
        let result = dijkstra(&g, &0);
        assert_eq!(result.distance(&0), Some(0));
        assert_eq!(result.predecessors[&0], None);
        assert_eq!(result.distance(&1), Some(2));
    }

    #[test]
    fn test_stale_entry_skipped() {
        // D is relaxed three times (direct S->D=10, via B=6, via C=3) before it
        // is popped; only the last entry may finalize it.
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("S", "D", 10.0).unwrap();
        g.add_edge("S", "B", 1.0).unwrap();
        g.add_edge("B", "D", 5.0).unwrap();
        g.add_edge("B", "C", 1.0).unwrap();
        g.add_edge("C", "D", 1.0).unwrap();

        let result = dijkstra(&g, &"S");
        assert_eq!(result.distance(&"D"), Some(3.0));
        assert_eq!(result.path_to(&"D"), vec!["S", "B", "C", "D"]);

        let stats = result.stats;
        assert_eq!(stats.finalized, 4);
        assert_eq!(stats.pushes, 6);
        assert_eq!(stats.stale_skips, 2);
        assert_eq!(stats.pops, stats.finalized + stats.stale_skips);
        assert_eq!(stats.relaxations, stats.pushes - 1);
    }

    #[test]
    fn test_tie_keeps_first_found_predecessor() {
        // Two equal-length routes to T: S->A->T and S->B->T.
        // A and B tie at distance 1; A has the smaller key, is finalized
        // first, and B's equal relaxation of T does not replace it.
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("S", "A", 1.0).unwrap();
        g.add_edge("S", "B", 1.0).unwrap();
        g.add_edge("A", "T", 1.0).unwrap();
        g.add_edge("B", "T", 1.0).unwrap();

        for _ in 0..5 {
            let result = dijkstra(&g, &"S");
            assert_eq!(result.distance(&"T"), Some(2.0));
            assert_eq!(result.predecessors[&"T"], Some("A"));
        }
    }

    #[test]
    fn test_tie_pops_smallest_key_first() {
        // Z is inserted before A, but at equal distance A pops first and
        // claims T; Z's later relaxation of T is only a tie.
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("S", "Z", 1.0).unwrap();
        g.add_edge("S", "A", 1.0).unwrap();
        g.add_edge("Z", "T", 1.0).unwrap();
        g.add_edge("A", "T", 1.0).unwrap();

        let result = dijkstra(&g, &"S");
        assert_eq!(result.distance(&"T"), Some(2.0));
        assert_eq!(result.predecessors[&"T"], Some("A"));
        assert_eq!(result.path_to(&"T"), vec!["S", "A", "T"]);
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("A", "B", 5.0).unwrap();
        g.add_edge("A", "B", 2.0).unwrap();
        g.add_edge("A", "B", 7.0).unwrap();
        let result = dijkstra(&g, &"A");
        assert_eq!(result.distance(&"B"), Some(2.0));
        assert_eq!(result.stats.relaxations, 2);
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut g: Graph<&str> = Graph::new();
        g.add_edge("A", "B", 0.0).unwrap();
        g.add_edge("B", "C", 0.0).unwrap();
        g.add_edge("A", "C", 1.0).unwrap();
        let result = dijkstra(&g, &"A");
        assert_eq!(result.distance(&"C"), Some(0.0));
        assert_eq!(result.path_to(&"C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_integer_weights_chain() {
        let g = chain(6);
        let result = dijkstra(&g, &0);
        assert_eq!(result.distance(&5), Some(5));
        assert_eq!(result.path_to(&5), vec![0, 1, 2, 3, 4, 5]);
        // Reverse direction is unreachable in a directed chain
        let back = dijkstra(&g, &5);
        assert_eq!(back.distance(&0), Some(u64::MAX));
    }

    #[test]
    fn test_integer_overflow_saturates_to_unreachable() {
        let mut g: Graph<u8, u8> = Graph::new();
        g.add_edge(0, 1, 200).unwrap();
        g.add_edge(1, 2, 100).unwrap();
        let result = dijkstra(&g, &0);
        assert_eq!(result.distance(&1), Some(200));
        assert_eq!(result.distance(&2), Some(u8::MAX));
        assert!(!result.is_reachable(&2));
    }

    #[test]
    fn test_integer_path_of_exactly_max_reads_unreached() {
        let mut g: Graph<u8, u8> = Graph::new();
        g.add_edge(0, 1, 200).unwrap();
        g.add_edge(1, 2, 55).unwrap();
        let result = dijkstra(&g, &0);
        // 200 + 55 == u8::MAX, which is also the unreached sentinel
        assert_eq!(result.distance(&2), Some(u8::MAX));
        assert!(!result.is_reachable(&2));
        assert_eq!(result.predecessors[&2], None);
        assert!(result.path_to(&2).is_empty());
    }

    #[test]
    fn test_solves_are_independent() {
        let g = sample_graph();
        let first = dijkstra(&g, &"A");
        let second = dijkstra(&g, &"F");
        assert_eq!(first.distance(&"F"), Some(13.0));
        assert_eq!(second.distance(&"A"), Some(13.0));
        assert_eq!(second.distance(&"F"), Some(0.0));
        let again = dijkstra(&g, &"A");
        assert_eq!(again.stats, first.stats);
    }

    #[test]
    fn test_into_parts() {
        let g = sample_graph();
        let (distances, predecessors) = dijkstra(&g, &"A").into_parts();
        assert_eq!(distances[&"E"], 10.0);
        assert_eq!(
            reconstruct_path(&predecessors, &"A", &"E"),
            vec!["A", "C", "B", "D", "E"]
        );
    }

    // --- Reconstruction tests ---

    #[test]
    fn test_reconstruct_self_without_data() {
        let empty: HashMap<&str, Option<&str>> = HashMap::new();
        assert_eq!(reconstruct_path(&empty, &"Q", &"Q"), vec!["Q"]);
    }

    #[test]
    fn test_reconstruct_unknown_target() {
        let g = sample_graph();
        let result = dijkstra(&g, &"A");
        assert!(reconstruct_path(&result.predecessors, &"A", &"nope").is_empty());
    }

    #[test]
    fn test_reconstruct_with_wrong_start() {
        // Predecessors from A; asking for a path from B that the chain never hits
        let g = sample_graph();
        let result = dijkstra(&g, &"A");
        assert!(reconstruct_path(&result.predecessors, &"F", &"C").is_empty());
    }

    #[test]
    fn test_reconstruct_cyclic_predecessors() {
        let mut prev: HashMap<&str, Option<&str>> = HashMap::new();
        prev.insert("X", Some("Y"));
        prev.insert("Y", Some("X"));
        prev.insert("S", None);
        assert!(reconstruct_path(&prev, &"S", &"X").is_empty());
    }

    // --- Convenience API ---

    #[test]
    fn test_shortest_path() {
        let g = sample_graph();
        let (d, path) = shortest_path(&g, &"A", &"E").unwrap();
        assert_eq!(d, 10.0);
        assert_eq!(path, vec!["A", "C", "B", "D", "E"]);
        assert_eq!(shortest_path(&g, &"A", &"A"), Some((0.0, vec!["A"])));
        assert_eq!(shortest_path(&g, &"A", &"missing"), None);
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let g = chain(4);
        assert_eq!(shortest_path(&g, &3, &0), None);
        assert_eq!(shortest_path(&g, &0, &3), Some((3, vec![0, 1, 2, 3])));
    }

    #[test]
    fn test_queue_entry_ordering() {
        let (a, b, c) = ("a", "b", "c");
        let near = QueueEntry { distance: 1.0f64, key: &a, node: 0 };
        let far = QueueEntry { distance: 2.0f64, key: &a, node: 1 };
        let near_later_key = QueueEntry { distance: 1.0f64, key: &c, node: 2 };
        let near_mid_key = QueueEntry { distance: 1.0f64, key: &b, node: 3 };
        // Max-heap ordering: "greater" pops first
        assert_eq!(near.cmp(&far), Ordering::Greater);
        assert_eq!(near.cmp(&near_later_key), Ordering::Greater);

        let mut heap = BinaryHeap::from(vec![far, near_later_key, near, near_mid_key]);
        assert_eq!(heap.pop().map(|e| e.node), Some(0));
        assert_eq!(heap.pop().map(|e| e.node), Some(3));
        assert_eq!(heap.pop().map(|e| e.node), Some(2));
        assert_eq!(heap.pop().map(|e| e.node), Some(1));
    }
}
