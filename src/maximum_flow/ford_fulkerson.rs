use crate::error::Result;
use crate::graph::EdgeId;
use crate::maximum_flow::pathfinder::Pathfinder;
use crate::maximum_flow::solver::{meets_threshold, ResidualNetwork, Solver};
use crate::maximum_flow::FlowValue;

/// Labeling method: breadth-first search for any augmenting path, augment by
/// its bottleneck, repeat until the sink is unreachable.
pub struct FordFulkerson<Flow> {
    pathfinder: Pathfinder,
    path: Vec<EdgeId>,
    threshold: Option<Flow>,
}

impl<Flow> Default for FordFulkerson<Flow> {
    fn default() -> Self {
        Self { pathfinder: Pathfinder::default(), path: Vec::new(), threshold: None }
    }
}

impl<Flow: FlowValue> FordFulkerson<Flow> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only edges with residual `>= threshold` are searched.
    pub fn set_threshold(&mut self, threshold: Option<Flow>) {
        self.threshold = threshold;
    }
}

impl<Flow: FlowValue> Solver<Flow> for FordFulkerson<Flow> {
    fn name(&self) -> &'static str {
        "ford-fulkerson"
    }

    fn solve_impl(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        let threshold = self.threshold;
        while self.pathfinder.calculate(network.graph(), network.source(), network.sink(), |graph, edge| meets_threshold(graph, edge, threshold))? {
            self.path.clear();
            self.path.extend(self.pathfinder.path());
            network.augment_path(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::solver::test_network;
    use rstest::*;

    #[rstest]
    #[case(4, vec![(0, 1, 4), (0, 2, 2), (1, 3, 5), (2, 1, 3), (2, 3, 1)], 6)]
    #[case(4, vec![(0, 1, 1), (0, 2, 1), (1, 2, 1), (1, 3, 1), (2, 3, 1)], 2)]
    #[case(3, vec![(1, 0, 5), (2, 1, 5)], 0)]
    fn reaches_maximum_value(#[case] num_vertices: usize, #[case] edges: Vec<(usize, usize, u64)>, #[case] expected: u64) {
        let mut network = test_network(num_vertices, &edges);
        FordFulkerson::new().solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), expected);
    }

    #[test]
    fn threshold_hides_thin_edges() {
        let mut network = test_network(3, &[(0, 1, 8), (1, 2, 3), (0, 2, 4)]);
        let mut solver = FordFulkerson::new();
        solver.set_threshold(Some(4));
        solver.solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), 4);
        assert_eq!(network.stats().augmentations, 1);

        solver.set_threshold(None);
        solver.solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), 7);
    }
}
