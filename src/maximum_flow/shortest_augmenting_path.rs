use crate::error::Result;
use crate::graph::EdgeId;
use crate::maximum_flow::distance_labeler::DistanceLabeler;
use crate::maximum_flow::solver::{meets_threshold, ResidualNetwork, Solver};
use crate::maximum_flow::FlowValue;

/// Advance along admissible edges, retreat with a relabel at dead ends, and
/// augment as soon as the sink is reached.
pub struct ShortestAugmentingPath<Flow> {
    labeler: DistanceLabeler,
    predecessors: Vec<Option<EdgeId>>,
    // counts[d] = number of vertices with distance d
    counts: Vec<usize>,
    path: Vec<EdgeId>,
    threshold: Option<Flow>,
    detect_min_cut: bool,
}

impl<Flow> Default for ShortestAugmentingPath<Flow> {
    fn default() -> Self {
        Self { labeler: DistanceLabeler::default(), predecessors: Vec::new(), counts: Vec::new(), path: Vec::new(), threshold: None, detect_min_cut: false }
    }
}

impl<Flow: FlowValue> ShortestAugmentingPath<Flow> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop as soon as some distance below the source's becomes empty.
    pub fn detect_min_cut(mut self, enabled: bool) -> Self {
        self.detect_min_cut = enabled;
        self
    }

    pub fn set_threshold(&mut self, threshold: Option<Flow>) {
        self.threshold = threshold;
    }

    fn initialize(&mut self, network: &ResidualNetwork<Flow>) -> Result<()> {
        let num_vertices = network.num_vertices();
        let threshold = self.threshold;
        self.labeler.calculate(network.graph(), network.sink(), |graph, edge| meets_threshold(graph, edge, threshold))?;

        self.counts.clear();
        self.counts.resize(num_vertices + 1, 0);
        for v in 0..num_vertices {
            if !self.labeler.is_valid(v) {
                self.labeler.set_distance(v, num_vertices);
            }
            self.counts[self.labeler.distance(v)] += 1;
        }

        self.predecessors.clear();
        self.predecessors.resize(num_vertices, None);
        Ok(())
    }

    fn find_admissible(&self, network: &ResidualNetwork<Flow>, u: usize) -> Result<Option<EdgeId>> {
        let graph = network.graph();
        for edge in graph.out_edges(graph.vertex(u)?)? {
            if meets_threshold(graph, edge, self.threshold) && self.labeler.is_admissible(graph, edge)? {
                return Ok(Some(edge));
            }
        }
        Ok(None)
    }

    // d(u) = 1 + min d(v) over residual edges u -> v, capped at n
    fn relabel(&mut self, network: &mut ResidualNetwork<Flow>, u: usize) -> Result<usize> {
        let num_vertices = network.num_vertices();
        let graph = network.graph();
        let mut distance = num_vertices;
        for edge in graph.out_edges(graph.vertex(u)?)? {
            if *graph.edge(edge)? > Flow::zero() && meets_threshold(graph, edge, self.threshold) {
                let to = graph.edge_target_index(edge)?;
                distance = distance.min(self.labeler.distance(to).saturating_add(1));
            }
        }

        let old = self.labeler.distance(u);
        self.counts[old] -= 1;
        self.counts[distance] += 1;
        self.labeler.set_distance(u, distance);
        network.stats_mut().relabels += 1;
        log::trace!("relabel {u}: {old} -> {distance}");
        Ok(old)
    }

    fn augment_to_sink(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        let (source, sink) = (network.source_index(), network.sink_index());
        self.path.clear();
        let mut v = sink;
        while v != source {
            let Some(edge) = self.predecessors[v] else { break };
            self.path.push(edge);
            v = network.graph().edge_source_index(edge)?;
        }
        network.augment_path(&self.path)?;
        Ok(())
    }
}

impl<Flow: FlowValue> Solver<Flow> for ShortestAugmentingPath<Flow> {
    fn name(&self) -> &'static str {
        "shortest-augmenting-path"
    }

    fn solve_impl(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        self.initialize(network)?;
        let num_vertices = network.num_vertices();
        let (source, sink) = (network.source_index(), network.sink_index());

        let mut current = source;
        while self.labeler.distance(source) < num_vertices {
            // advance
            if let Some(edge) = self.find_admissible(network, current)? {
                let to = network.graph().edge_target_index(edge)?;
                self.predecessors[to] = Some(edge);
                current = to;
                if current == sink {
                    self.augment_to_sink(network)?;
                    current = source;
                }
                continue;
            }

            // retreat
            let old = self.relabel(network, current)?;
            if self.detect_min_cut && self.counts[old] == 0 {
                log::debug!("{}: distance {old} emptied, minimum cut found", self.name());
                network.stats_mut().gap_cuts += 1;
                break;
            }
            if current != source {
                if let Some(edge) = self.predecessors[current] {
                    current = network.graph().edge_source_index(edge)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::solver::test_network;
    use crate::maximum_flow::ResidualGraph;
    use rstest::*;

    fn edges() -> Vec<(usize, usize, u64)> {
        vec![(0, 1, 16), (0, 2, 13), (1, 2, 10), (2, 1, 4), (1, 3, 12), (3, 2, 9), (2, 4, 14), (4, 3, 7), (3, 5, 20), (4, 5, 4)]
    }

    #[rstest]
    fn solves_with_and_without_gap_detection(#[values(false, true)] detect_min_cut: bool) {
        let mut network = test_network(6, &edges());
        ShortestAugmentingPath::new().detect_min_cut(detect_min_cut).solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), 23);
        assert_eq!(network.minimum_cut().unwrap(), vec![0, 1, 2, 4]);
        if !detect_min_cut {
            assert_eq!(network.stats().gap_cuts, 0);
        }
    }

    #[test]
    fn gap_detection_stops_early() {
        // 0 -> 1 -> 2 -> 3 with a dead end 1 -> 4
        let mut graph: ResidualGraph<u64> = ResidualGraph::new();
        let v = graph.add_vertices(5);
        for (from, to, residual) in [(0, 1, 2), (1, 2, 1), (2, 3, 5), (1, 4, 3)] {
            graph.add_out_edge(v[from], v[to], residual).unwrap();
        }
        let mut network = ResidualNetwork::new(graph, v[0], v[3]).unwrap();
        ShortestAugmentingPath::new().detect_min_cut(true).solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), 1);
        assert_eq!(network.stats().gap_cuts, 1);
        assert_eq!(network.stats().augmentations, 1);
    }
}
