use crate::error::Result;
use crate::maximum_flow::ford_fulkerson::FordFulkerson;
use crate::maximum_flow::residual_graph::accumulate;
use crate::maximum_flow::shortest_augmenting_path::ShortestAugmentingPath;
use crate::maximum_flow::solver::{ResidualNetwork, Solver};
use crate::maximum_flow::{FlowValue, ResidualGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalingSubSolver {
    FordFulkerson,
    ShortestAugmentingPath,
}

/// Runs the sub-solver once per phase on the edges with residual `>= delta`,
/// halving `delta` from the largest power of two not above the maximum
/// capacity down to one.
pub struct CapacityScaling<Flow> {
    sub_solver: ScalingSubSolver,
    remove_delta_edges: bool,
    ford_fulkerson: FordFulkerson<Flow>,
    shortest_augmenting_path: ShortestAugmentingPath<Flow>,
}

impl<Flow: FlowValue> CapacityScaling<Flow> {
    pub fn new(sub_solver: ScalingSubSolver) -> Self {
        Self { sub_solver, remove_delta_edges: false, ford_fulkerson: FordFulkerson::new(), shortest_augmenting_path: ShortestAugmentingPath::new() }
    }

    /// Solve every phase on a separate subgraph holding only the edges with
    /// residual `>= delta`, then replay its augmentations on the full graph.
    pub fn remove_delta_edges(mut self, enabled: bool) -> Self {
        self.remove_delta_edges = enabled;
        self
    }

    pub fn detect_min_cut(mut self, enabled: bool) -> Self {
        self.shortest_augmenting_path = self.shortest_augmenting_path.detect_min_cut(enabled);
        self
    }

    fn run_sub_solver(&mut self, network: &mut ResidualNetwork<Flow>, threshold: Option<Flow>) -> Result<()> {
        match self.sub_solver {
            ScalingSubSolver::FordFulkerson => {
                self.ford_fulkerson.set_threshold(threshold);
                self.ford_fulkerson.solve_impl(network)
            }
            ScalingSubSolver::ShortestAugmentingPath => {
                self.shortest_augmenting_path.set_threshold(threshold);
                self.shortest_augmenting_path.solve_impl(network)
            }
        }
    }

    fn solve_delta_subgraph(&mut self, network: &mut ResidualNetwork<Flow>, delta: Flow) -> Result<()> {
        let full = network.graph();
        let mut subgraph = ResidualGraph::new();
        subgraph.add_vertices(full.num_vertices());
        subgraph.set_matrix(true)?;
        for edge in full.edges() {
            let residual = *full.edge(edge)?;
            if residual >= delta {
                let (from, to) = full.edge_indices(edge)?;
                accumulate(&mut subgraph, from, to, residual)?;
            }
        }
        log::debug!("{}: delta subgraph with {} of {} edges", self.name(), subgraph.num_edges(), full.num_edges());

        let (source, sink) = (subgraph.vertex(network.source_index())?, subgraph.vertex(network.sink_index())?);
        let mut delta_network = ResidualNetwork::new(subgraph, source, sink)?.remove_zero_edges(true).prune_below(delta).recording();
        self.run_sub_solver(&mut delta_network, None)?;

        for augmentation in delta_network.take_journal() {
            network.augment_between(augmentation.from, augmentation.to, augmentation.amount)?;
        }
        network.stats_mut().merge(delta_network.stats());
        Ok(())
    }
}

impl<Flow: FlowValue> Solver<Flow> for CapacityScaling<Flow> {
    fn name(&self) -> &'static str {
        match self.sub_solver {
            ScalingSubSolver::FordFulkerson => "capacity-scaling-ford-fulkerson",
            ScalingSubSolver::ShortestAugmentingPath => "capacity-scaling-shortest-augmenting-path",
        }
    }

    fn solve_impl(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        let two = Flow::one() + Flow::one();
        let max_capacity = network.max_capacity();
        let mut delta = Flow::one();
        while delta <= max_capacity / two {
            delta *= two;
        }

        while delta > Flow::zero() {
            log::debug!("{}: phase delta = {delta}", self.name());
            if self.remove_delta_edges {
                self.solve_delta_subgraph(network, delta)?;
            } else {
                self.run_sub_solver(network, Some(delta))?;
            }
            network.stats_mut().phases += 1;
            delta /= two;
        }
        Ok(())
    }
}
