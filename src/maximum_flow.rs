pub mod augment;
pub mod capacity_scaling;
pub mod distance_labeler;
pub mod edge_flow;
pub mod ford_fulkerson;
pub mod pathfinder;
pub mod preflow_push;
pub mod push_relabel_excess_scaling;
pub mod push_relabel_fifo;
pub mod push_relabel_highest_label;
pub mod push_relabel_naive;
pub mod residual_graph;
pub mod shortest_augmenting_path;
pub mod solver;
pub mod verification;

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::maximum_flow::capacity_scaling::{CapacityScaling, ScalingSubSolver};
use crate::maximum_flow::ford_fulkerson::FordFulkerson;
use crate::maximum_flow::preflow_push::PreflowPush;
use crate::maximum_flow::push_relabel_excess_scaling::ExcessScalingSelection;
use crate::maximum_flow::push_relabel_fifo::FifoSelection;
use crate::maximum_flow::push_relabel_highest_label::HighestLabelSelection;
use crate::maximum_flow::push_relabel_naive::NaiveSelection;
use crate::maximum_flow::residual_graph::{capacity_lookup, create_residual_graph, update_flows_from_residual_graph};
use crate::maximum_flow::shortest_augmenting_path::ShortestAugmentingPath;
use crate::maximum_flow::solver::{ResidualNetwork, SolveStats, Solver};
use num_traits::NumAssign;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

pub use edge_flow::EdgeFlow;

/// Scalar used for capacities, flows and residual capacities.
pub trait FlowValue: NumAssign + Ord + Copy + Debug + Display + 'static {}

impl<T> FlowValue for T where T: NumAssign + Ord + Copy + Debug + Display + 'static {}

/// Flow network: every edge carries a `(capacity, flow)` pair.
pub type FlowGraph<Flow, V = ()> = Graph<V, EdgeFlow<Flow>>;

/// Residual network: every edge carries its residual capacity.
pub type ResidualGraph<Flow> = Graph<(), Flow>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverKind {
    FordFulkerson,
    ShortestAugmentingPath,
    CapacityScalingFordFulkerson,
    CapacityScalingShortestAugmentingPath,
    NaivePreflowPush,
    FifoPreflowPush,
    HighestLabelPreflowPush,
    ExcessScalingPreflowPush,
}

impl SolverKind {
    pub const ALL: [SolverKind; 8] = [
        SolverKind::FordFulkerson,
        SolverKind::ShortestAugmentingPath,
        SolverKind::CapacityScalingFordFulkerson,
        SolverKind::CapacityScalingShortestAugmentingPath,
        SolverKind::NaivePreflowPush,
        SolverKind::FifoPreflowPush,
        SolverKind::HighestLabelPreflowPush,
        SolverKind::ExcessScalingPreflowPush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::FordFulkerson => "ford-fulkerson",
            SolverKind::ShortestAugmentingPath => "shortest-augmenting-path",
            SolverKind::CapacityScalingFordFulkerson => "capacity-scaling-ford-fulkerson",
            SolverKind::CapacityScalingShortestAugmentingPath => "capacity-scaling-shortest-augmenting-path",
            SolverKind::NaivePreflowPush => "naive-preflow-push",
            SolverKind::FifoPreflowPush => "fifo-preflow-push",
            SolverKind::HighestLabelPreflowPush => "highest-label-preflow-push",
            SolverKind::ExcessScalingPreflowPush => "excess-scaling-preflow-push",
        }
    }

    pub fn build<Flow: FlowValue>(self, flags: SolverFlags) -> Box<dyn Solver<Flow>> {
        let detect_min_cut = flags.contains(SolverFlags::DETECT_MIN_CUT);
        let remove_delta_edges = flags.contains(SolverFlags::REMOVE_DELTA_EDGES);
        match self {
            SolverKind::FordFulkerson => Box::new(FordFulkerson::new()),
            SolverKind::ShortestAugmentingPath => Box::new(ShortestAugmentingPath::new().detect_min_cut(detect_min_cut)),
            SolverKind::CapacityScalingFordFulkerson => {
                Box::new(CapacityScaling::new(ScalingSubSolver::FordFulkerson).remove_delta_edges(remove_delta_edges))
            }
            SolverKind::CapacityScalingShortestAugmentingPath => Box::new(
                CapacityScaling::new(ScalingSubSolver::ShortestAugmentingPath)
                    .remove_delta_edges(remove_delta_edges)
                    .detect_min_cut(detect_min_cut),
            ),
            SolverKind::NaivePreflowPush => Box::new(PreflowPush::new(NaiveSelection)),
            SolverKind::FifoPreflowPush => Box::new(PreflowPush::new(FifoSelection::default())),
            SolverKind::HighestLabelPreflowPush => Box::new(PreflowPush::new(HighestLabelSelection::default())),
            SolverKind::ExcessScalingPreflowPush => Box::new(PreflowPush::new(ExcessScalingSelection::<Flow>::default())),
        }
    }
}

impl Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SolverKind::ALL.into_iter().find(|kind| kind.name() == s).ok_or_else(|| Error::UnknownSolver(s.to_string()))
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SolverFlags: u32 {
        /// Destroy residual edges as soon as their residual capacity hits zero.
        const REMOVE_ZERO_EDGES = 1 << 0;
        /// Capacity scaling works on a separate subgraph holding only edges with residual >= delta.
        const REMOVE_DELTA_EDGES = 1 << 1;
        /// Shortest augmenting path stops once a distance class empties.
        const DETECT_MIN_CUT = 1 << 2;
    }
}

impl Default for SolverFlags {
    fn default() -> Self {
        SolverFlags::empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveReport<Flow> {
    pub kind: SolverKind,
    pub value: Flow,
    pub stats: SolveStats,
}

/// Solves in place: flows on `graph` are replaced by a maximum flow.
pub fn solve<V, Flow: FlowValue>(graph: &mut FlowGraph<Flow, V>, source: VertexId, sink: VertexId, kind: SolverKind, flags: SolverFlags) -> Result<SolveReport<Flow>> {
    let (source_index, sink_index) = (graph.vertex_index(source)?, graph.vertex_index(sink)?);
    if source_index == sink_index {
        return Err(Error::SourceIsSink);
    }

    let residual = create_residual_graph(graph)?;
    let (residual_source, residual_sink) = (residual.vertex(source_index)?, residual.vertex(sink_index)?);
    let mut network = ResidualNetwork::new(residual, residual_source, residual_sink)?
        .with_capacities(capacity_lookup(graph)?)
        .remove_zero_edges(flags.contains(SolverFlags::REMOVE_ZERO_EDGES));

    log::debug!("{kind}: {} vertices, {} edges, flags {flags:?}", graph.num_vertices(), graph.num_edges());
    kind.build::<Flow>(flags).solve(&mut network)?;

    update_flows_from_residual_graph(network.graph(), graph)?;
    let value = verification::flow_value(graph, source)?;
    log::debug!("{kind}: maximum flow {value}");
    Ok(SolveReport { kind, value, stats: *network.stats() })
}

/// Solves a copy and leaves `graph` untouched.
pub fn solve_copy<V: Clone, Flow: FlowValue>(
    graph: &FlowGraph<Flow, V>,
    source: VertexId,
    sink: VertexId,
    kind: SolverKind,
    flags: SolverFlags,
) -> Result<(FlowGraph<Flow, V>, SolveReport<Flow>)> {
    let mut copy = graph.clone();
    let source = copy.vertex(graph.vertex_index(source)?)?;
    let sink = copy.vertex(graph.vertex_index(sink)?)?;
    let report = solve(&mut copy, source, sink, kind, flags)?;
    Ok((copy, report))
}
