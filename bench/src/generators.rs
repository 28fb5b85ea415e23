//! Synthetic weighted topologies. All O(n) or O(n + edges), single-threaded,
//! deterministic for a given node count.

use std::collections::VecDeque;

use shortpath_core::Graph;

pub type Generator = fn(u64) -> shortpath_core::Result<Graph<u64>>;

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Edge weight in [1, 10).
    pub fn weight(&mut self) -> f64 {
        1.0 + self.next_f64() * 9.0
    }
}

/// L-system fractal tree: each node spawns three children.
///
/// Deep paths with exponential width; every node is reachable from the root
/// by exactly one path, so no relaxation is ever stale.
pub fn gen_lsystem(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    graph.add_node(0);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_edge(parent, child, rng.weight())?;
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling (preferential attachment).
///
/// Edges are undirected so hubs are reachable from anywhere.
pub fn gen_scale_free(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let edges_per_node = 10u64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * edges_per_node * 2) as usize);
    let mut rng = FastRng::new(12345);

    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        graph.add_node(i);
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_undirected_edge(i, j, rng.weight())?;
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        graph.add_node(new_node);

        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            // Endpoint sampling picks nodes proportional to degree
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_node {
                graph.add_undirected_edge(new_node, target, rng.weight())?;
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): directed ring lattice with random rewiring.
pub fn gen_small_world(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        graph.add_node(i);
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let weight = rng.weight();

            let target = if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            graph.add_edge(i, target, weight)?;
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: ~10 uniform random directed edges per node.
pub fn gen_random(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let target_edges = node_count * 10;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        graph.add_node(i);
    }

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to, rng.weight())?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense clusters joined by a chain of ten bridge nodes.
///
/// Every path from the first cluster to the second crosses the bridge, and
/// the bridge edges are heavy, which produces many superseded queue entries.
pub fn gen_barbell(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let bridge_len = 10u64;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut graph = Graph::with_capacity(node_count as usize, (clique_size * 40 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);

    for i in 0..clique_size {
        graph.add_node(i);
    }
    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size.saturating_sub(1)) {
            let target = rng.next(clique_size);
            if target != i {
                graph.add_edge(i, target, rng.weight())?;
            }
        }
    }

    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let from = if i == 0 { clique_size.saturating_sub(1) } else { id - 1 };
        graph.add_edge(from, id, 50.0)?;
    }

    let b_start = bridge_start + bridge_len;
    for i in 0..clique_size {
        graph.add_node(b_start + i);
    }
    if clique_size > 0 {
        graph.add_edge(b_start - 1, b_start, 50.0)?;
    }

    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size.saturating_sub(1)) {
            let target = rng.next(clique_size);
            if target != i {
                graph.add_edge(b_start + i, b_start + target, rng.weight())?;
            }
        }
    }

    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a recent "surface" node, with an occasional
/// second edge that creates loops. Edges are undirected.
pub fn gen_dla(node_count: u64) -> shortpath_core::Result<Graph<u64>> {
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * 3) as usize);
    let mut rng = FastRng::new(77777);

    graph.add_node(0);

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.add_undirected_edge(new_node, attach_to, rng.weight())?;

        // 10% chance of a shortcut
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                graph.add_undirected_edge(new_node, other, rng.weight())?;
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
