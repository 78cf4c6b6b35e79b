use crate::maximum_flow::preflow_push::{Preflow, VertexSelection};
use crate::maximum_flow::FlowValue;

/// Picks the lowest-indexed active vertex by scanning all of them. O(n) per pick.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveSelection;

impl<Flow: FlowValue> VertexSelection<Flow> for NaiveSelection {
    const NAME: &'static str = "naive-preflow-push";

    fn reset(&mut self, _preflow: &Preflow<Flow>) {}

    fn activate(&mut self, _preflow: &Preflow<Flow>, _vertex: usize) {}

    fn next(&mut self, preflow: &Preflow<Flow>) -> Option<usize> {
        preflow.active_vertices().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::preflow_push::PreflowPush;
    use crate::maximum_flow::solver::{test_network, Solver};
    use rstest::*;

    #[rstest]
    #[case(4, vec![(0, 1, 4), (0, 2, 2), (1, 3, 5), (2, 1, 3), (2, 3, 1)], 6)]
    #[case(4, vec![(0, 1, 10), (1, 2, 1), (2, 3, 10)], 1)]
    #[case(5, vec![(0, 1, 3), (1, 2, 3), (2, 1, 3), (1, 4, 2), (0, 3, 1)], 2)]
    fn reaches_maximum_value(#[case] num_vertices: usize, #[case] edges: Vec<(usize, usize, u64)>, #[case] expected: u64) {
        let mut network = test_network(num_vertices, &edges);
        let mut solver = PreflowPush::new(NaiveSelection);
        solver.solve(&mut network).unwrap();
        assert_eq!(network.flow_value().unwrap(), expected);
        assert_eq!(solver.preflow().active_vertices().count(), 0);
    }
}
