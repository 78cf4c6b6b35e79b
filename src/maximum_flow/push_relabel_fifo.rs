use crate::maximum_flow::preflow_push::{Preflow, VertexSelection};
use crate::maximum_flow::FlowValue;
use std::collections::VecDeque;

/// Active vertices are discharged in the order they became active.
#[derive(Debug, Default)]
pub struct FifoSelection {
    active_nodes: VecDeque<usize>,
    queued: Vec<bool>,
}

impl<Flow: FlowValue> VertexSelection<Flow> for FifoSelection {
    const NAME: &'static str = "fifo-preflow-push";

    fn reset(&mut self, preflow: &Preflow<Flow>) {
        self.active_nodes.clear();
        self.queued.clear();
        self.queued.resize(preflow.num_vertices(), false);
        for v in preflow.active_vertices() {
            self.queued[v] = true;
            self.active_nodes.push_back(v);
        }
    }

    fn activate(&mut self, _preflow: &Preflow<Flow>, vertex: usize) {
        if !self.queued[vertex] {
            self.queued[vertex] = true;
            self.active_nodes.push_back(vertex);
        }
    }

    fn next(&mut self, preflow: &Preflow<Flow>) -> Option<usize> {
        while let Some(u) = self.active_nodes.pop_front() {
            self.queued[u] = false;
            if preflow.is_active(u) {
                return Some(u);
            }
        }
        None
    }
}
