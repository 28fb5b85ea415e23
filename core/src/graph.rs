use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};
use crate::traversal::{dijkstra, ShortestPaths};
use crate::weight::Weight;

/// Capabilities a node identity must provide: equality and hashing for the
/// index, ordering to break distance ties in the solver, cloning into output
/// maps, and `Debug` for error messages and logs.
pub trait NodeKey: Eq + Hash + Ord + Clone + Debug {}

impl<T: Eq + Hash + Ord + Clone + Debug> NodeKey for T {}

/// Dense node index, assigned in insertion order.
pub type NodeIndex = usize;

/// A directed, weighted edge in the adjacency list. The origin is implicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub target: NodeIndex,
    pub weight: W,
}

/// In-memory weighted graph: interned node keys + adjacency lists.
///
/// Node keys are interned to dense indices on first reference, so the
/// solver works on `Vec`s instead of hashing every edge target. Edges are
/// directed; an undirected edge is stored as two independent records.
/// Parallel edges are kept.
#[derive(Debug, Clone)]
pub struct Graph<N, W = f64> {
    keys: Vec<N>,
    index: HashMap<N, NodeIndex>,
    outgoing: Vec<Vec<Edge<W>>>,
    edge_count: usize,
}

impl<N: NodeKey, W: Weight> Graph<N, W> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known graph size.
    ///
    /// `edge_count` is not reserved up front: edges land in per-node lists
    /// whose sizes are unknown until load.
    pub fn with_capacity(node_count: usize, _edge_count: usize) -> Self {
        Self {
            keys: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            outgoing: Vec::with_capacity(node_count),
            edge_count: 0,
        }
    }

    /// Ensure `id` exists, returning its index. Idempotent.
    pub fn add_node(&mut self, id: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.keys.len();
        self.keys.push(id.clone());
        self.index.insert(id, idx);
        self.outgoing.push(Vec::new());
        idx
    }

    /// Add a directed edge `from -> to`, creating either endpoint if absent.
    ///
    /// Fails with [`GraphError::InvalidWeight`] on a negative or NaN weight,
    /// before anything is inserted.
    pub fn add_edge(&mut self, from: N, to: N, weight: W) -> Result<()> {
        check_weight(&from, &to, weight)?;
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.push_edge(from, to, weight);
        Ok(())
    }

    /// Add `a -> b` and `b -> a` with the same weight as one operation.
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: W) -> Result<()> {
        check_weight(&a, &b, weight)?;
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.push_edge(a, b, weight);
        self.push_edge(b, a, weight);
        Ok(())
    }

    /// Bulk load directed edges from `(from, to, weight)` triples.
    ///
    /// All weights are checked before the first insert, so a rejected batch
    /// leaves the graph untouched. Returns the number of edges appended.
    pub fn load_edges<I>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = (N, N, W)>,
    {
        let edges: Vec<(N, N, W)> = edges.into_iter().collect();
        for (from, to, weight) in &edges {
            check_weight(from, to, *weight)?;
        }

        let loaded = edges.len();
        for (from, to, weight) in edges {
            let from = self.add_node(from);
            let to = self.add_node(to);
            self.push_edge(from, to, weight);
        }
        Ok(loaded)
    }

    fn push_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: W) {
        self.outgoing[from].push(Edge { target: to, weight });
        self.edge_count += 1;
    }

    /// Outgoing edges of `id` as `(destination, weight)`, in insertion order.
    /// Empty if `id` is unknown.
    pub fn neighbors<'a>(&'a self, id: &N) -> impl Iterator<Item = (&'a N, W)> + 'a {
        let edges: &[Edge<W>] = match self.index.get(id) {
            Some(&idx) => self.edges_at(idx),
            None => &[],
        };
        edges.iter().map(|e| (&self.keys[e.target], e.weight))
    }

    /// All node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.keys.iter()
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &N) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Resolve an index back to its node id.
    pub fn node_key(&self, idx: NodeIndex) -> Option<&N> {
        self.keys.get(idx)
    }

    /// Outgoing edges by index. Empty for an out-of-range index.
    pub fn edges_at(&self, idx: NodeIndex) -> &[Edge<W>] {
        self.outgoing.get(idx).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of directed edge records (an undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let keys_mem = self.keys.capacity() * size_of::<N>();
        // key copy + index + hashbrown control byte and slack
        let index_mem = self.index.capacity() * (size_of::<N>() + size_of::<NodeIndex>() + 8);
        let lists_mem = self.outgoing.capacity() * size_of::<Vec<Edge<W>>>();
        let edges_mem: usize = self
            .outgoing
            .iter()
            .map(|v| v.capacity() * size_of::<Edge<W>>())
            .sum();

        keys_mem + index_mem + lists_mem + edges_mem
    }

    /// Insert `start` if absent, then solve from it.
    ///
    /// Use [`dijkstra`] directly to solve against a shared borrow; it treats
    /// an unknown start as isolated without inserting it.
    pub fn solve(&mut self, start: N) -> ShortestPaths<N, W> {
        self.add_node(start.clone());
        dijkstra(self, &start)
    }
}

impl<N: NodeKey, W: Weight> Default for Graph<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_weight<N: NodeKey, W: Weight>(from: &N, to: &N, weight: W) -> Result<()> {
    if weight.is_valid() {
        return Ok(());
    }
    tracing::debug!(?from, ?to, ?weight, "rejected edge with invalid weight");
    Err(GraphError::InvalidWeight {
        from: format!("{:?}", from),
        to: format!("{:?}", to),
        weight: format!("{:?}", weight),
    })
}
