use crate::error::{Error, Result};
use crate::graph::EdgeId;
use crate::maximum_flow::distance_labeler::DistanceLabeler;
use crate::maximum_flow::solver::{ResidualNetwork, Solver};
use crate::maximum_flow::FlowValue;

/// Excesses and distance labels of a preflow.
#[derive(Debug)]
pub struct Preflow<Flow> {
    labeler: DistanceLabeler,
    excesses: Vec<Flow>,
    source: usize,
    sink: usize,
}

impl<Flow> Default for Preflow<Flow> {
    fn default() -> Self {
        Self { labeler: DistanceLabeler::default(), excesses: Vec::new(), source: 0, sink: 0 }
    }
}

impl<Flow: FlowValue> Preflow<Flow> {
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.excesses.len()
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.sink
    }

    #[inline]
    pub fn excess(&self, vertex: usize) -> Flow {
        self.excesses[vertex]
    }

    #[inline]
    pub fn label(&self, vertex: usize) -> usize {
        self.labeler.distance(vertex)
    }

    /// Holds excess and is neither source nor sink.
    #[inline]
    pub fn is_active(&self, vertex: usize) -> bool {
        vertex != self.source && vertex != self.sink && self.excesses[vertex] > Flow::zero()
    }

    pub fn active_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_vertices()).filter(|&v| self.is_active(v))
    }

    #[cfg(test)]
    pub(crate) fn from_parts(labels: &[usize], excesses: Vec<Flow>, source: usize, sink: usize) -> Self {
        let mut graph = crate::maximum_flow::ResidualGraph::<Flow>::new();
        let vertices = graph.add_vertices(labels.len());
        let mut labeler = DistanceLabeler::default();
        labeler.calculate(&graph, vertices[sink], |_, _| true).unwrap();
        for (v, &label) in labels.iter().enumerate() {
            labeler.set_distance(v, label);
        }
        Self { labeler, excesses, source, sink }
    }

    // exact labels, n for the source and for vertices cut off from the sink,
    // then every source out-edge into a vertex below n is saturated. Edges into
    // vertices at n keep d(s) <= d(v) + 1 unsaturated, so an already maximum
    // flow is left alone.
    fn initialize(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        let num_vertices = network.num_vertices();
        self.source = network.source_index();
        self.sink = network.sink_index();
        self.labeler.calculate(network.graph(), network.sink(), |_, _| true)?;
        for v in 0..num_vertices {
            if !self.labeler.is_valid(v) {
                self.labeler.set_distance(v, num_vertices);
            }
        }
        self.labeler.set_distance(self.source, num_vertices);

        self.excesses.clear();
        self.excesses.resize(num_vertices, Flow::zero());
        let edges: Vec<EdgeId> = network.graph().out_edges(network.source())?.collect();
        for edge in edges {
            let residual = network.residual(edge)?;
            let to = network.graph().edge_target_index(edge)?;
            if residual == Flow::zero() || self.labeler.distance(to) >= num_vertices {
                continue;
            }
            network.augment(edge, residual)?;
            self.excesses[to] += residual;
            network.stats_mut().pushes += 1;
        }
        Ok(())
    }

    fn find_push<S: VertexSelection<Flow>>(&self, network: &ResidualNetwork<Flow>, selection: &S, v: usize) -> Result<Option<(EdgeId, usize, Flow)>> {
        let graph = network.graph();
        for edge in graph.out_edges(graph.vertex(v)?)? {
            if !self.labeler.is_admissible(graph, edge)? {
                continue;
            }
            let to = graph.edge_target_index(edge)?;
            let mut amount = self.excesses[v].min(*graph.edge(edge)?);
            if let Some(limit) = selection.push_limit(self, to) {
                amount = amount.min(limit);
            }
            if amount > Flow::zero() {
                return Ok(Some((edge, to, amount)));
            }
        }
        Ok(None)
    }

    fn push(&mut self, network: &mut ResidualNetwork<Flow>, edge: EdgeId, from: usize, to: usize, amount: Flow) -> Result<()> {
        network.augment(edge, amount)?;
        self.excesses[from] -= amount;
        self.excesses[to] += amount;
        network.stats_mut().pushes += 1;
        Ok(())
    }

    fn relabel(&mut self, network: &mut ResidualNetwork<Flow>, v: usize) -> Result<()> {
        let graph = network.graph();
        let mut label = None;
        for edge in graph.out_edges(graph.vertex(v)?)? {
            if *graph.edge(edge)? > Flow::zero() {
                let candidate = self.labeler.distance(graph.edge_target_index(edge)?) + 1;
                label = Some(label.map_or(candidate, |current: usize| current.min(candidate)));
            }
        }

        let label = label.ok_or(Error::StuckExcess(v))?;
        log::trace!("relabel {v}: {} -> {label}", self.labeler.distance(v));
        self.labeler.set_distance(v, label);
        network.stats_mut().relabels += 1;
        Ok(())
    }
}

/// Chooses which active vertex is discharged next.
pub trait VertexSelection<Flow: FlowValue> {
    const NAME: &'static str;

    /// Called once the source has been saturated.
    fn reset(&mut self, preflow: &Preflow<Flow>);

    /// `vertex` is active, or just gained excess.
    fn activate(&mut self, preflow: &Preflow<Flow>, vertex: usize);

    fn next(&mut self, preflow: &Preflow<Flow>) -> Option<usize>;

    /// Upper bound on a push into `to`.
    fn push_limit(&self, _preflow: &Preflow<Flow>, _to: usize) -> Option<Flow> {
        None
    }

    /// Whether discharging continues after a push that leaves excess behind.
    fn keep_discharging(&self) -> bool {
        true
    }

    /// Starts another phase once `next` runs dry; returns false when done.
    fn next_phase(&mut self, _preflow: &Preflow<Flow>) -> bool {
        false
    }
}

/// Generic push-relabel driven by a `VertexSelection`.
pub struct PreflowPush<Flow, S> {
    preflow: Preflow<Flow>,
    selection: S,
}

impl<Flow: FlowValue, S: VertexSelection<Flow>> PreflowPush<Flow, S> {
    pub fn new(selection: S) -> Self {
        Self { preflow: Preflow::default(), selection }
    }

    pub fn preflow(&self) -> &Preflow<Flow> {
        &self.preflow
    }

    fn discharge(&mut self, network: &mut ResidualNetwork<Flow>, v: usize) -> Result<()> {
        loop {
            match self.preflow.find_push(network, &self.selection, v)? {
                Some((edge, to, amount)) => {
                    self.preflow.push(network, edge, v, to, amount)?;
                    if self.preflow.is_active(to) {
                        self.selection.activate(&self.preflow, to);
                    }
                    if !self.preflow.is_active(v) {
                        return Ok(());
                    }
                }
                None => {
                    self.preflow.relabel(network, v)?;
                    break;
                }
            }
            if !self.selection.keep_discharging() {
                break;
            }
        }

        if self.preflow.is_active(v) {
            self.selection.activate(&self.preflow, v);
        }
        Ok(())
    }
}

impl<Flow: FlowValue, S: VertexSelection<Flow>> Solver<Flow> for PreflowPush<Flow, S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn solve_impl(&mut self, network: &mut ResidualNetwork<Flow>) -> Result<()> {
        self.preflow.initialize(network)?;
        self.selection.reset(&self.preflow);

        loop {
            while let Some(v) = self.selection.next(&self.preflow) {
                self.discharge(network, v)?;
            }
            if !self.selection.next_phase(&self.preflow) {
                break;
            }
            network.stats_mut().phases += 1;
        }
        debug_assert!(self.preflow.active_vertices().next().is_none());
        Ok(())
    }
}
