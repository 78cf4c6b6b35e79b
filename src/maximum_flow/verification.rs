use crate::error::{Error, Result};
use crate::graph::VertexId;
use crate::maximum_flow::{solve_copy, FlowGraph, FlowValue, SolverFlags, SolverKind};

struct Balance<Flow> {
    inflow: Vec<Flow>,
    outflow: Vec<Flow>,
}

fn balance<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>) -> Result<Balance<Flow>> {
    let mut inflow = vec![Flow::zero(); graph.num_vertices()];
    let mut outflow = vec![Flow::zero(); graph.num_vertices()];
    for edge in graph.edges() {
        let (from, to) = graph.edge_indices(edge)?;
        let flow = graph.edge(edge)?.flow();
        outflow[from] += flow;
        inflow[to] += flow;
    }
    Ok(Balance { inflow, outflow })
}

/// Describes the first violated flow property, `None` for a valid flow.
pub fn check_flow<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId) -> Result<Option<String>> {
    let (s, t) = (graph.vertex_index(source)?, graph.vertex_index(sink)?);

    for edge in graph.edges() {
        let payload = graph.edge(edge)?;
        if payload.flow() < Flow::zero() || payload.flow() > payload.capacity() {
            let (from, to) = graph.edge_indices(edge)?;
            return Ok(Some(format!("edge {from} -> {to} carries {} of capacity {}", payload.flow(), payload.capacity())));
        }
    }

    let Balance { inflow, outflow } = balance(graph)?;
    for v in 0..graph.num_vertices() {
        if v != s && v != t && inflow[v] != outflow[v] {
            return Ok(Some(format!("vertex {v} receives {} but sends {}", inflow[v], outflow[v])));
        }
    }

    // out(s) - in(s) == in(t) - out(t)
    if s != t && outflow[s] + outflow[t] != inflow[s] + inflow[t] {
        return Ok(Some(format!("source sends {} net of {} while sink receives {} net of {}", outflow[s], inflow[s], inflow[t], outflow[t])));
    }
    Ok(None)
}

pub fn is_flow<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId) -> Result<bool> {
    Ok(check_flow(graph, source, sink)?.is_none())
}

pub fn ensure_flow<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId) -> Result<()> {
    match check_flow(graph, source, sink)? {
        Some(reason) => Err(Error::NotAFlow(reason)),
        None => Ok(()),
    }
}

/// Net outflow of `source`.
pub fn flow_value<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId) -> Result<Flow> {
    let s = graph.vertex_index(source)?;
    let Balance { inflow, outflow } = balance(graph)?;
    if inflow[s] > outflow[s] {
        return Err(Error::NotAFlow(format!("source receives {} but sends {}", inflow[s], outflow[s])));
    }
    Ok(outflow[s] - inflow[s])
}

/// Reference value computed with Ford-Fulkerson on a copy.
pub fn maximum_flow_value<V: Clone, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId) -> Result<Flow> {
    let (_, report) = solve_copy(graph, source, sink, SolverKind::FordFulkerson, SolverFlags::empty())?;
    Ok(report.value)
}

/// A valid flow whose value equals `expected`, or the reference maximum when
/// no value is given.
pub fn is_max_flow<V: Clone, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId, expected: Option<Flow>) -> Result<bool> {
    match ensure_max_flow(graph, source, sink, expected) {
        Ok(()) => Ok(true),
        Err(Error::NotAFlow(_) | Error::NotMaximum { .. }) => Ok(false),
        Err(error) => Err(error),
    }
}

pub fn ensure_max_flow<V: Clone, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, source: VertexId, sink: VertexId, expected: Option<Flow>) -> Result<()> {
    ensure_flow(graph, source, sink)?;
    let actual = flow_value(graph, source)?;
    let expected = match expected {
        Some(expected) => expected,
        None => maximum_flow_value(graph, source, sink)?,
    };
    if actual != expected {
        return Err(Error::NotMaximum { actual: actual.to_string(), expected: expected.to_string() });
    }
    Ok(())
}
