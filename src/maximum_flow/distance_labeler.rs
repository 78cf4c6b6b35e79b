use crate::error::Result;
use crate::graph::{EdgeId, VertexId};
use crate::maximum_flow::{FlowValue, ResidualGraph};
use std::collections::VecDeque;

/// Label of a vertex from which the sink is unreachable.
pub const INVALID_DISTANCE: usize = usize::MAX;

/// Distance-to-sink labels, computed by a breadth-first search from the sink
/// that walks positive residual edges backwards.
#[derive(Debug, Default)]
pub struct DistanceLabeler {
    distances: Vec<usize>,
    incoming: Vec<Vec<usize>>,
    que: VecDeque<usize>,
}

impl DistanceLabeler {
    // O(n + m)
    pub fn calculate<Flow, F>(&mut self, graph: &ResidualGraph<Flow>, sink: VertexId, mut selector: F) -> Result<()>
    where
        Flow: FlowValue,
        F: FnMut(&ResidualGraph<Flow>, EdgeId) -> bool,
    {
        let num_vertices = graph.num_vertices();
        let sink = graph.vertex_index(sink)?;

        self.incoming.iter_mut().for_each(Vec::clear);
        self.incoming.resize_with(num_vertices, Vec::new);
        for edge in graph.edges() {
            if *graph.edge(edge)? == Flow::zero() || !selector(graph, edge) {
                continue;
            }
            let (from, to) = graph.edge_indices(edge)?;
            self.incoming[to].push(from);
        }

        self.distances.clear();
        self.distances.resize(num_vertices, INVALID_DISTANCE);
        self.distances[sink] = 0;
        self.que.clear();
        self.que.push_back(sink);
        while let Some(v) = self.que.pop_front() {
            // u -> v
            for &u in self.incoming[v].iter() {
                if self.distances[u] == INVALID_DISTANCE {
                    self.distances[u] = self.distances[v] + 1;
                    self.que.push_back(u);
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn distance(&self, vertex: usize) -> usize {
        self.distances[vertex]
    }

    #[inline]
    pub fn set_distance(&mut self, vertex: usize, distance: usize) {
        self.distances[vertex] = distance;
    }

    #[inline]
    pub fn is_valid(&self, vertex: usize) -> bool {
        self.distances[vertex] != INVALID_DISTANCE
    }

    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    /// Positive residual, both ends labeled and `d(from) == d(to) + 1`.
    pub fn is_admissible<Flow: FlowValue>(&self, graph: &ResidualGraph<Flow>, edge: EdgeId) -> Result<bool> {
        if *graph.edge(edge)? == Flow::zero() {
            return Ok(false);
        }
        let (from, to) = graph.edge_indices(edge)?;
        Ok(self.is_valid(from) && self.is_valid(to) && self.distances[from] == self.distances[to] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_distance_to_sink_over_positive_edges() {
        let mut graph: ResidualGraph<u64> = ResidualGraph::new();
        let v = graph.add_vertices(5);
        let e01 = graph.add_out_edge(v[0], v[1], 3).unwrap();
        let e12 = graph.add_out_edge(v[1], v[2], 1).unwrap();
        let e02 = graph.add_out_edge(v[0], v[2], 0).unwrap();
        graph.add_out_edge(v[2], v[3], 1).unwrap();
        graph.add_out_edge(v[3], v[4], 0).unwrap();

        let mut labeler = DistanceLabeler::default();
        labeler.calculate(&graph, v[3], |_, _| true).unwrap();
        assert_eq!(labeler.distances(), &[3, 2, 1, 0, INVALID_DISTANCE]);
        assert!(labeler.is_admissible(&graph, e01).unwrap());
        assert!(labeler.is_admissible(&graph, e12).unwrap());
        assert!(!labeler.is_admissible(&graph, e02).unwrap());

        labeler.set_distance(1, 5);
        assert!(!labeler.is_admissible(&graph, e01).unwrap());
        assert_eq!(labeler.num_vertices(), 5);
    }

    #[test]
    fn selector_restricts_the_search() {
        let mut graph: ResidualGraph<u64> = ResidualGraph::new();
        let v = graph.add_vertices(3);
        graph.add_out_edge(v[0], v[2], 1).unwrap();
        graph.add_out_edge(v[0], v[1], 4).unwrap();
        graph.add_out_edge(v[1], v[2], 4).unwrap();

        let mut labeler = DistanceLabeler::default();
        labeler.calculate(&graph, v[2], |g, e| *g.edge(e).unwrap() >= 2).unwrap();
        assert_eq!(labeler.distances(), &[2, 1, 0]);
        assert!(labeler.is_valid(0));
    }
}
