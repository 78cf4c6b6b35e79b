use crate::maximum_flow::preflow_push::{Preflow, VertexSelection};
use crate::maximum_flow::FlowValue;

/// Excess scaling: within a phase only vertices with excess above `delta / 2`
/// are discharged, lowest label first, and a push never lifts the receiver's
/// excess above `delta`. `delta` starts at the smallest power of two covering
/// every initial excess and halves each phase.
#[derive(Debug)]
pub struct ExcessScalingSelection<Flow> {
    delta: Flow,
    buckets: Vec<Vec<usize>>, // buckets[i] = large-excess nodes with label i
    in_bucket: Vec<bool>,
    lowest: usize,
    len: usize,
}

impl<Flow: FlowValue> Default for ExcessScalingSelection<Flow> {
    fn default() -> Self {
        Self { delta: Flow::one(), buckets: Vec::new(), in_bucket: Vec::new(), lowest: 0, len: 0 }
    }
}

impl<Flow: FlowValue> ExcessScalingSelection<Flow> {
    pub fn delta(&self) -> Flow {
        self.delta
    }

    #[inline]
    fn is_large(&self, preflow: &Preflow<Flow>, vertex: usize) -> bool {
        let two = Flow::one() + Flow::one();
        preflow.is_active(vertex) && preflow.excess(vertex) > self.delta / two
    }

    fn refill(&mut self, preflow: &Preflow<Flow>) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.in_bucket.clear();
        self.in_bucket.resize(preflow.num_vertices(), false);
        self.lowest = usize::MAX;
        self.len = 0;
        for v in preflow.active_vertices() {
            self.activate(preflow, v);
        }
    }
}

impl<Flow: FlowValue> VertexSelection<Flow> for ExcessScalingSelection<Flow> {
    const NAME: &'static str = "excess-scaling-preflow-push";

    fn reset(&mut self, preflow: &Preflow<Flow>) {
        let two = Flow::one() + Flow::one();
        let max_excess = preflow.active_vertices().map(|v| preflow.excess(v)).max().unwrap_or_else(Flow::one);
        self.delta = Flow::one();
        while self.delta < max_excess {
            self.delta *= two;
        }
        self.buckets.resize_with(2 * preflow.num_vertices(), Vec::new);
        self.refill(preflow);
    }

    fn activate(&mut self, preflow: &Preflow<Flow>, vertex: usize) {
        if self.in_bucket[vertex] || !self.is_large(preflow, vertex) {
            return;
        }
        let label = preflow.label(vertex);
        if label >= self.buckets.len() {
            self.buckets.resize_with(label + 1, Vec::new);
        }
        self.buckets[label].push(vertex);
        self.in_bucket[vertex] = true;
        self.lowest = self.lowest.min(label);
        self.len += 1;
    }

    fn next(&mut self, preflow: &Preflow<Flow>) -> Option<usize> {
        while self.len > 0 {
            match self.buckets[self.lowest].pop() {
                Some(u) => {
                    self.in_bucket[u] = false;
                    self.len -= 1;
                    if self.is_large(preflow, u) {
                        return Some(u);
                    }
                }
                None => self.lowest += 1,
            }
        }
        None
    }

    // delta - e(to), clamped at zero; source and sink take anything
    fn push_limit(&self, preflow: &Preflow<Flow>, to: usize) -> Option<Flow> {
        if to == preflow.source() || to == preflow.sink() {
            return None;
        }
        let excess = preflow.excess(to);
        Some(if self.delta > excess { self.delta - excess } else { Flow::zero() })
    }

    fn keep_discharging(&self) -> bool {
        false
    }

    fn next_phase(&mut self, preflow: &Preflow<Flow>) -> bool {
        let two = Flow::one() + Flow::one();
        while self.delta > Flow::one() {
            self.delta /= two;
            log::debug!("{}: delta = {}", Self::NAME, self.delta);
            self.refill(preflow);
            if self.len > 0 {
                return true;
            }
        }
        false
    }
}
