use crate::error::{Error, Result};
use crate::graph::{EdgeId, VertexId};
use crate::maximum_flow::augment::{augment, bottleneck};
use crate::maximum_flow::pathfinder::Pathfinder;
use crate::maximum_flow::{FlowValue, ResidualGraph};
use std::collections::HashMap;

/// One recorded augmentation, by vertex index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Augmentation<Flow> {
    pub from: usize,
    pub to: usize,
    pub amount: Flow,
}

/// Work counters of one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub augmentations: usize,
    pub pushes: usize,
    pub relabels: usize,
    pub phases: usize,
    pub gap_cuts: usize,
}

impl SolveStats {
    pub fn merge(&mut self, other: &SolveStats) {
        self.augmentations += other.augmentations;
        self.pushes += other.pushes;
        self.relabels += other.relabels;
        self.phases += other.phases;
        self.gap_cuts += other.gap_cuts;
    }
}

/// A residual graph prepared for solving: source, sink, the original
/// capacities and the policies applied on every augmentation.
#[derive(Debug)]
pub struct ResidualNetwork<Flow> {
    graph: ResidualGraph<Flow>,
    source: VertexId,
    sink: VertexId,
    source_index: usize,
    sink_index: usize,
    capacities: HashMap<(usize, usize), Flow>,
    remove_zero_edges: bool,
    prune_below: Option<Flow>,
    journal: Option<Vec<Augmentation<Flow>>>,
    stats: SolveStats,
}

impl<Flow: FlowValue> ResidualNetwork<Flow> {
    /// Capacities default to the residual values found in `graph`.
    pub fn new(graph: ResidualGraph<Flow>, source: VertexId, sink: VertexId) -> Result<Self> {
        let (source_index, sink_index) = (graph.vertex_index(source)?, graph.vertex_index(sink)?);
        if source_index == sink_index {
            return Err(Error::SourceIsSink);
        }

        let mut capacities = HashMap::new();
        for edge in graph.edges() {
            *capacities.entry(graph.edge_indices(edge)?).or_insert_with(Flow::zero) += *graph.edge(edge)?;
        }
        Ok(Self {
            graph,
            source,
            sink,
            source_index,
            sink_index,
            capacities,
            remove_zero_edges: false,
            prune_below: None,
            journal: None,
            stats: SolveStats::default(),
        })
    }

    pub fn with_capacities(mut self, capacities: HashMap<(usize, usize), Flow>) -> Self {
        self.capacities = capacities;
        self
    }

    pub fn remove_zero_edges(mut self, enabled: bool) -> Self {
        self.remove_zero_edges = enabled;
        self
    }

    /// Destroys augmented edges whose residual drops below `threshold`.
    pub(crate) fn prune_below(mut self, threshold: Flow) -> Self {
        self.prune_below = Some(threshold);
        self
    }

    /// Records every augmentation for a later `take_journal`.
    pub fn recording(mut self) -> Self {
        self.journal = Some(Vec::new());
        self
    }

    #[inline]
    pub fn graph(&self) -> &ResidualGraph<Flow> {
        &self.graph
    }

    pub fn into_graph(self) -> ResidualGraph<Flow> {
        self.graph
    }

    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> VertexId {
        self.sink
    }

    #[inline]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    #[inline]
    pub fn sink_index(&self) -> usize {
        self.sink_index
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    pub fn capacity(&self, from: usize, to: usize) -> Flow {
        self.capacities.get(&(from, to)).copied().unwrap_or_else(Flow::zero)
    }

    pub fn max_capacity(&self) -> Flow {
        self.capacities.values().copied().max().unwrap_or_else(Flow::zero)
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolveStats {
        &mut self.stats
    }

    #[inline]
    pub fn residual(&self, edge: EdgeId) -> Result<Flow> {
        self.graph.edge(edge).copied()
    }

    /// Net flow into the sink: `sum r(t, x) - sum c(t, x)`.
    pub fn flow_value(&self) -> Result<Flow> {
        let mut inflow = Flow::zero();
        for edge in self.graph.out_edges(self.sink)? {
            inflow += *self.graph.edge(edge)?;
        }
        let outflow = self.capacities.iter().filter(|((from, _), _)| *from == self.sink_index).fold(Flow::zero(), |sum, (_, &capacity)| sum + capacity);
        if inflow < outflow {
            return Err(Error::NotAFlow(format!("sink sends {outflow} but receives {inflow}")));
        }
        Ok(inflow - outflow)
    }

    pub fn augment(&mut self, edge: EdgeId, amount: Flow) -> Result<()> {
        let (from, to) = self.graph.edge_indices(edge)?;
        augment(&mut self.graph, edge, amount, self.remove_zero_edges)?;
        if let Some(threshold) = self.prune_below {
            if self.graph.contains_edge(edge) && *self.graph.edge(edge)? < threshold {
                self.graph.destroy_edge(edge)?;
            }
        }
        if let Some(journal) = &mut self.journal {
            journal.push(Augmentation { from, to, amount });
        }
        log::trace!("augment {from} -> {to} by {amount}");
        Ok(())
    }

    /// Augments `amount` from `from` to `to`, spread over parallel edges if
    /// there are several.
    pub fn augment_between(&mut self, from: usize, to: usize, amount: Flow) -> Result<()> {
        let mut remaining = amount;
        while remaining > Flow::zero() {
            let mut found = None;
            for edge in self.graph.out_edges(self.graph.vertex(from)?)? {
                if self.graph.edge_target_index(edge)? == to && *self.graph.edge(edge)? > Flow::zero() {
                    found = Some(edge);
                    break;
                }
            }
            let edge = found.ok_or(Error::MissingEdge { from, to })?;
            let step = remaining.min(*self.graph.edge(edge)?);
            self.augment(edge, step)?;
            remaining -= step;
        }
        Ok(())
    }

    /// Augments a path by its bottleneck and returns the amount sent.
    pub fn augment_path(&mut self, path: &[EdgeId]) -> Result<Flow> {
        let amount = bottleneck(&self.graph, path)?;
        for &edge in path {
            self.augment(edge, amount)?;
        }
        self.stats.augmentations += 1;
        Ok(amount)
    }

    /// Source side of a minimum cut, valid once the flow is maximum.
    pub fn minimum_cut(&self) -> Result<Vec<usize>> {
        let mut pathfinder = Pathfinder::default();
        pathfinder.label(&self.graph, self.source, |_, _| true)?;
        Ok(pathfinder.labeled_vertices().collect())
    }

    pub fn take_journal(&mut self) -> Vec<Augmentation<Flow>> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

pub(crate) fn meets_threshold<Flow: FlowValue>(graph: &ResidualGraph<Flow>, edge: EdgeId, threshold: Option<Flow>) -> bool {
    match threshold {
        Some(threshold) => graph.edge(edge).is_ok_and(|residual| *residual >= threshold),
        None => true,
    }
}

pub trait Solver<Flow: FlowValue> {
    fn name(&self) -> &'static str;

    fn solve_impl(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()>;

    fn solve(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        log::debug!("{}: {} -> {} on {} vertices, {} residual edges", self.name(), network.source_index(), network.sink_index(), network.num_vertices(), network.graph().num_edges());
        self.solve_impl(network)?;
        log::debug!("{}: done, {:?}", self.name(), network.stats());
        Ok(())
    }
}

/// Network from `(from, to, capacity)` triples with source 0 and sink `num_vertices - 1`.
#[cfg(test)]
pub(crate) fn test_network(num_vertices: usize, edges: &[(usize, usize, u64)]) -> ResidualNetwork<u64> {
    use crate::maximum_flow::residual_graph::{capacity_lookup, create_residual_graph};
    use crate::maximum_flow::FlowGraph;

    let mut graph: FlowGraph<u64> = FlowGraph::new();
    let v = graph.add_vertices(num_vertices);
    for &(from, to, capacity) in edges {
        graph.add_flow_edge(v[from], v[to], capacity).unwrap();
    }
    let residual = create_residual_graph(&graph).unwrap();
    let (source, sink) = (residual.vertex(0).unwrap(), residual.vertex(num_vertices - 1).unwrap());
    ResidualNetwork::new(residual, source, sink).unwrap().with_capacities(capacity_lookup(&graph).unwrap())
}
