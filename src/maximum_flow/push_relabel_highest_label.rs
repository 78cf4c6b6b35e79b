use crate::maximum_flow::preflow_push::{Preflow, VertexSelection};
use crate::maximum_flow::FlowValue;

/// Always discharges an active vertex with the highest label.
#[derive(Debug, Default)]
pub struct HighestLabelSelection {
    buckets: Vec<Vec<usize>>, // buckets[i] = active nodes with label i
    in_bucket: Vec<bool>,
    bucket_idx: usize,
    len: usize,
}

impl<Flow: FlowValue> VertexSelection<Flow> for HighestLabelSelection {
    const NAME: &'static str = "highest-label-preflow-push";

    fn reset(&mut self, preflow: &Preflow<Flow>) {
        let num_vertices = preflow.num_vertices();
        self.buckets.iter_mut().for_each(Vec::clear);
        // labels never exceed 2n - 1
        self.buckets.resize_with(2 * num_vertices, Vec::new);
        self.in_bucket.clear();
        self.in_bucket.resize(num_vertices, false);
        self.bucket_idx = 0;
        self.len = 0;
        for v in preflow.active_vertices() {
            self.activate(preflow, v);
        }
    }

    fn activate(&mut self, preflow: &Preflow<Flow>, vertex: usize) {
        if self.in_bucket[vertex] {
            return;
        }
        let label = preflow.label(vertex);
        if label >= self.buckets.len() {
            self.buckets.resize_with(label + 1, Vec::new);
        }
        self.buckets[label].push(vertex);
        self.in_bucket[vertex] = true;
        self.bucket_idx = self.bucket_idx.max(label);
        self.len += 1;
    }

    fn next(&mut self, preflow: &Preflow<Flow>) -> Option<usize> {
        while self.len > 0 {
            match self.buckets[self.bucket_idx].pop() {
                Some(u) => {
                    self.in_bucket[u] = false;
                    self.len -= 1;
                    if preflow.is_active(u) {
                        return Some(u);
                    }
                }
                None => self.bucket_idx = self.bucket_idx.saturating_sub(1),
            }
        }
        None
    }
}
