#![allow(dead_code)]

use max_flow::graph::VertexId;
use max_flow::maximum_flow::FlowGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Random network with parallel and anti-parallel edges allowed; source 0,
/// sink `num_vertices - 1`.
pub fn random_network(seed: u64, num_vertices: usize, num_edges: usize, max_capacity: u64) -> (FlowGraph<u64>, VertexId, VertexId) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = FlowGraph::new();
    let v = graph.add_vertices(num_vertices);
    for _ in 0..num_edges {
        let from = rng.random_range(0..num_vertices);
        let to = rng.random_range(0..num_vertices);
        if from == to {
            continue;
        }
        graph.add_flow_edge(v[from], v[to], rng.random_range(0..=max_capacity)).unwrap();
    }
    (graph, v[0], v[num_vertices - 1])
}

pub fn network_from(num_vertices: usize, edges: &[(usize, usize, u64)]) -> (FlowGraph<u64>, VertexId, VertexId) {
    let mut graph = FlowGraph::new();
    let v = graph.add_vertices(num_vertices);
    for &(from, to, capacity) in edges {
        graph.add_flow_edge(v[from], v[to], capacity).unwrap();
    }
    (graph, v[0], v[num_vertices - 1])
}

// CLRS figure 26.1, maximum flow 23
pub fn clrs() -> (FlowGraph<u64>, VertexId, VertexId) {
    network_from(6, &[(0, 1, 16), (0, 2, 13), (1, 2, 10), (2, 1, 4), (1, 3, 12), (3, 2, 9), (2, 4, 14), (4, 3, 7), (3, 5, 20), (4, 5, 4)])
}
