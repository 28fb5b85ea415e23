//! shortpath-core: weighted graph store and single-source shortest paths.
//!
//! A pure Rust library that keeps a weighted adjacency list, runs Dijkstra
//! from a start node, and rebuilds start→target paths from the resulting
//! predecessor map. No I/O; the caller builds the graph, then queries it.
//!
//! ```
//! use shortpath_core::{dijkstra, Graph};
//!
//! let mut g: Graph<&str> = Graph::new();
//! g.add_undirected_edge("A", "B", 4.0).unwrap();
//! g.add_undirected_edge("A", "C", 2.0).unwrap();
//! g.add_undirected_edge("B", "C", 1.0).unwrap();
//!
//! let result = dijkstra(&g, &"A");
//! assert_eq!(result.distance(&"B"), Some(3.0));
//! assert_eq!(result.path_to(&"B"), vec!["A", "C", "B"]);
//! ```

mod error;
mod graph;
mod traversal;
mod weight;

pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, NodeIndex, NodeKey};
pub use traversal::{
    dijkstra, reconstruct_path, shortest_path, ShortestPaths, SolveStats,
};
pub use weight::Weight;
