use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::maximum_flow::FlowValue;

/// `(capacity, flow)` carried by an edge of a flow network; `0 <= flow <= capacity` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeFlow<Flow> {
    capacity: Flow,
    flow: Flow,
}

impl<Flow: FlowValue> EdgeFlow<Flow> {
    pub fn new(capacity: Flow, flow: Flow) -> Result<Self> {
        Self::check(capacity, flow)?;
        Ok(Self { capacity, flow })
    }

    pub fn with_capacity(capacity: Flow) -> Result<Self> {
        Self::new(capacity, Flow::zero())
    }

    #[inline]
    pub fn capacity(&self) -> Flow {
        self.capacity
    }

    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }

    pub fn set_flow(&mut self, flow: Flow) -> Result<()> {
        Self::check(self.capacity, flow)?;
        self.flow = flow;
        Ok(())
    }

    pub fn set_capacity(&mut self, capacity: Flow) -> Result<()> {
        Self::check(capacity, self.flow)?;
        self.capacity = capacity;
        Ok(())
    }

    pub fn set(&mut self, capacity: Flow, flow: Flow) -> Result<()> {
        Self::check(capacity, flow)?;
        self.capacity = capacity;
        self.flow = flow;
        Ok(())
    }

    fn check(capacity: Flow, flow: Flow) -> Result<()> {
        if flow < Flow::zero() || flow > capacity {
            return Err(Error::InvalidFlow { flow: flow.to_string(), capacity: capacity.to_string() });
        }
        Ok(())
    }
}

impl<V, Flow: FlowValue> Graph<V, EdgeFlow<Flow>> {
    pub fn add_flow_edge(&mut self, from: VertexId, to: VertexId, capacity: Flow) -> Result<EdgeId> {
        self.add_out_edge(from, to, EdgeFlow::with_capacity(capacity)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(5, 0)]
    #[case(5, 5)]
    #[case(0, 0)]
    fn accepts_flow_within_capacity(#[case] capacity: i64, #[case] flow: i64) {
        let edge = EdgeFlow::new(capacity, flow).unwrap();
        assert_eq!(edge.residual_capacity(), capacity - flow);
    }

    #[rstest]
    #[case(5, 6)]
    #[case(5, -1)]
    #[case(-1, 0)]
    fn rejects_flow_outside_capacity(#[case] capacity: i64, #[case] flow: i64) {
        assert_eq!(EdgeFlow::new(capacity, flow).unwrap_err(), Error::InvalidFlow { flow: flow.to_string(), capacity: capacity.to_string() });
    }

    #[test]
    fn failed_setters_leave_the_edge_unchanged() {
        let mut edge = EdgeFlow::new(4u64, 3).unwrap();
        assert!(edge.set_capacity(2).is_err());
        assert!(edge.set_flow(5).is_err());
        assert!(edge.set(1, 2).is_err());
        assert_eq!(edge, EdgeFlow::new(4, 3).unwrap());

        edge.set_flow(4).unwrap();
        edge.set_capacity(9).unwrap();
        assert_eq!((edge.capacity(), edge.flow()), (9, 4));
    }
}
