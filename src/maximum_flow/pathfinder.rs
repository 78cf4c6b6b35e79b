use crate::error::Result;
use crate::graph::{EdgeId, VertexId};
use crate::maximum_flow::{FlowValue, ResidualGraph};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    Unlabeled,
    Root,
    Reached { edge: EdgeId, from: usize },
}

/// Breadth-first labeling over positive residual edges accepted by a selector.
///
/// Every labeled vertex remembers the residual edge it was reached through,
/// so the labels form a predecessor tree rooted at the source.
#[derive(Debug)]
pub struct Pathfinder {
    labels: Vec<Label>,
    que: VecDeque<usize>,
    source: usize,
    sink: Option<usize>,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self { labels: Vec::new(), que: VecDeque::new(), source: 0, sink: None }
    }
}

impl Pathfinder {
    /// Searches from `source` until `sink` is labeled; returns whether it was.
    pub fn calculate<Flow, F>(&mut self, graph: &ResidualGraph<Flow>, source: VertexId, sink: VertexId, selector: F) -> Result<bool>
    where
        Flow: FlowValue,
        F: FnMut(&ResidualGraph<Flow>, EdgeId) -> bool,
    {
        let sink = graph.vertex_index(sink)?;
        self.search(graph, source, Some(sink), selector)?;
        Ok(self.is_sink_labeled())
    }

    /// Labels everything reachable from `source`.
    pub fn label<Flow, F>(&mut self, graph: &ResidualGraph<Flow>, source: VertexId, selector: F) -> Result<()>
    where
        Flow: FlowValue,
        F: FnMut(&ResidualGraph<Flow>, EdgeId) -> bool,
    {
        self.search(graph, source, None, selector)
    }

    fn search<Flow, F>(&mut self, graph: &ResidualGraph<Flow>, source: VertexId, sink: Option<usize>, mut selector: F) -> Result<()>
    where
        Flow: FlowValue,
        F: FnMut(&ResidualGraph<Flow>, EdgeId) -> bool,
    {
        let source = graph.vertex_index(source)?;
        self.labels.clear();
        self.labels.resize(graph.num_vertices(), Label::Unlabeled);
        self.source = source;
        self.sink = sink;
        self.labels[source] = Label::Root;
        if sink == Some(source) {
            return Ok(());
        }

        self.que.clear();
        self.que.push_back(source);
        while let Some(u) = self.que.pop_front() {
            for edge in graph.out_edges(graph.vertex(u)?)? {
                let to = graph.edge_target_index(edge)?;
                if self.labels[to] != Label::Unlabeled || *graph.edge(edge)? == Flow::zero() || !selector(graph, edge) {
                    continue;
                }

                self.labels[to] = Label::Reached { edge, from: u };
                if sink == Some(to) {
                    return Ok(());
                }
                self.que.push_back(to);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn is_labeled(&self, vertex: usize) -> bool {
        self.labels.get(vertex).is_some_and(|label| *label != Label::Unlabeled)
    }

    pub fn is_source_labeled(&self) -> bool {
        self.is_labeled(self.source)
    }

    pub fn is_sink_labeled(&self) -> bool {
        self.sink.is_some_and(|sink| self.is_labeled(sink))
    }

    /// The residual edge `vertex` was reached through.
    pub fn predecessor(&self, vertex: usize) -> Option<EdgeId> {
        match self.labels.get(vertex) {
            Some(Label::Reached { edge, .. }) => Some(*edge),
            _ => None,
        }
    }

    pub fn labeled_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.labels.len()).filter(|&vertex| self.is_labeled(vertex))
    }

    /// Edges of the labeled path, from the sink back to the source. Empty
    /// unless the sink is labeled.
    pub fn path(&self) -> PathEdges<'_> {
        let current = self.sink.filter(|&sink| self.is_labeled(sink));
        PathEdges { labels: &self.labels, current }
    }
}

pub struct PathEdges<'a> {
    labels: &'a [Label],
    current: Option<usize>,
}

impl Iterator for PathEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        match self.labels[self.current?] {
            Label::Reached { edge, from } => {
                self.current = Some(from);
                Some(edge)
            }
            _ => {
                self.current = None;
                None
            }
        }
    }
}
