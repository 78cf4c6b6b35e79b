use crate::error::{Error, Result};
use crate::graph::EdgeId;
use crate::maximum_flow::{FlowGraph, FlowValue, ResidualGraph};
use std::collections::{BTreeMap, HashMap};

/// Builds the residual network of `graph` in matrix mode.
///
/// Each edge `u -> v` adds `capacity - flow` to the residual edge `u -> v` and
/// `flow` to `v -> u`, creating either one when missing. Parallel and
/// anti-parallel edges therefore accumulate into one residual edge per
/// direction.
pub fn create_residual_graph<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>) -> Result<ResidualGraph<Flow>> {
    let mut residual = ResidualGraph::new();
    residual.add_vertices(graph.num_vertices());
    residual.set_matrix(true)?;

    for edge in graph.edges() {
        let (from, to) = graph.edge_indices(edge)?;
        let payload = graph.edge(edge)?;
        accumulate(&mut residual, from, to, payload.residual_capacity())?;
        accumulate(&mut residual, to, from, payload.flow())?;
    }
    Ok(residual)
}

/// Adds `amount` to the residual edge `from -> to`, creating it if needed.
pub fn accumulate<Flow: FlowValue>(residual: &mut ResidualGraph<Flow>, from: usize, to: usize, amount: Flow) -> Result<EdgeId> {
    let edge = match residual.find_edge_between(from, to)? {
        Some(edge) => edge,
        None => residual.add_out_edge(residual.vertex(from)?, residual.vertex(to)?, Flow::zero())?,
    };
    *residual.edge_mut(edge)? += amount;
    Ok(edge)
}

/// Original capacity by `(from index, to index)`, parallel edges summed.
pub fn capacity_lookup<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>) -> Result<HashMap<(usize, usize), Flow>> {
    let mut capacities = HashMap::new();
    for edge in graph.edges() {
        *capacities.entry(graph.edge_indices(edge)?).or_insert_with(Flow::zero) += graph.edge(edge)?.capacity();
    }
    Ok(capacities)
}

#[derive(Default)]
struct VertexPair {
    forward: Vec<EdgeId>,
    backward: Vec<EdgeId>,
}

/// Writes the flow encoded by `residual` back onto `graph`.
///
/// Every unordered vertex pair is handled once with its lower index as the
/// source side. For a single edge `u -> v` this sets `flow = capacity - r`
/// where `r` is the residual capacity left on `u -> v`. With parallel or
/// anti-parallel edges the existing flows are moved as little as possible:
/// flow on the opposite direction is cancelled before new flow is added.
pub fn update_flows_from_residual_graph<V, Flow: FlowValue>(residual: &ResidualGraph<Flow>, graph: &mut FlowGraph<Flow, V>) -> Result<()> {
    if residual.num_vertices() != graph.num_vertices() {
        return Err(Error::VertexCountMismatch { flow: graph.num_vertices(), residual: residual.num_vertices() });
    }

    let mut pairs: BTreeMap<(usize, usize), VertexPair> = BTreeMap::new();
    for edge in graph.edges() {
        let (from, to) = graph.edge_indices(edge)?;
        match from.cmp(&to) {
            std::cmp::Ordering::Less => pairs.entry((from, to)).or_default().forward.push(edge),
            std::cmp::Ordering::Greater => pairs.entry((to, from)).or_default().backward.push(edge),
            // self-loops never carry augmenting flow
            std::cmp::Ordering::Equal => {}
        }
    }

    // validate every pair before touching a single flow
    let mut moves = Vec::with_capacity(pairs.len());
    for ((lower, higher), pair) in pairs {
        // potential = flow lower -> higher + unused capacity higher -> lower
        let mut total = Flow::zero();
        let mut current = Flow::zero();
        for &edge in pair.forward.iter() {
            let payload = graph.edge(edge)?;
            total += payload.capacity();
            current += payload.flow();
        }
        for &edge in pair.backward.iter() {
            let payload = graph.edge(edge)?;
            total += payload.capacity();
            current += payload.residual_capacity();
        }

        let remaining = match residual.find_edge_between(lower, higher)? {
            Some(edge) => *residual.edge(edge)?,
            None => Flow::zero(),
        };
        if remaining > total {
            return Err(Error::ResidualMismatch { from: lower, to: higher });
        }
        moves.push((pair, current, total - remaining));
    }

    for (pair, current, target) in moves {
        if target > current {
            let rest = cancel_flow(graph, &pair.backward, target - current)?;
            let rest = add_flow(graph, &pair.forward, rest)?;
            debug_assert!(rest == Flow::zero());
        } else if target < current {
            let rest = cancel_flow(graph, &pair.forward, current - target)?;
            let rest = add_flow(graph, &pair.backward, rest)?;
            debug_assert!(rest == Flow::zero());
        }
    }
    Ok(())
}

fn cancel_flow<V, Flow: FlowValue>(graph: &mut FlowGraph<Flow, V>, edges: &[EdgeId], mut amount: Flow) -> Result<Flow> {
    for &edge in edges {
        if amount == Flow::zero() {
            break;
        }
        let payload = graph.edge_mut(edge)?;
        let delta = amount.min(payload.flow());
        payload.set_flow(payload.flow() - delta)?;
        amount -= delta;
    }
    Ok(amount)
}

fn add_flow<V, Flow: FlowValue>(graph: &mut FlowGraph<Flow, V>, edges: &[EdgeId], mut amount: Flow) -> Result<Flow> {
    for &edge in edges {
        if amount == Flow::zero() {
            break;
        }
        let payload = graph.edge_mut(edge)?;
        let delta = amount.min(payload.residual_capacity());
        payload.set_flow(payload.flow() + delta)?;
        amount -= delta;
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::EdgeFlow;
    use rstest::*;

    fn residual_value(residual: &ResidualGraph<u64>, from: usize, to: usize) -> Option<u64> {
        residual.find_edge_between(from, to).unwrap().map(|edge| *residual.edge(edge).unwrap())
    }

    #[test]
    fn parallel_edges_merge_into_one_residual_edge() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(2);
        graph.add_flow_edge(v[0], v[1], 2).unwrap();
        graph.add_flow_edge(v[0], v[1], 3).unwrap();

        let residual = create_residual_graph(&graph).unwrap();
        assert!(residual.has_matrix());
        assert_eq!(residual.num_edges(), 2);
        assert_eq!(residual_value(&residual, 0, 1), Some(5));
        assert_eq!(residual_value(&residual, 1, 0), Some(0));
    }

    #[test]
    fn flow_becomes_backward_residual() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(3);
        graph.add_out_edge(v[0], v[1], EdgeFlow::new(7, 3).unwrap()).unwrap();
        graph.add_out_edge(v[1], v[0], EdgeFlow::new(2, 1).unwrap()).unwrap();

        let residual = create_residual_graph(&graph).unwrap();
        assert_eq!(residual_value(&residual, 0, 1), Some(4 + 1));
        assert_eq!(residual_value(&residual, 1, 0), Some(3 + 1));
        assert_eq!(residual_value(&residual, 0, 2), None);

        let lookup = capacity_lookup(&graph).unwrap();
        assert_eq!(lookup[&(0, 1)], 7);
        assert_eq!(lookup[&(1, 0)], 2);
    }

    #[rstest]
    #[case(vec![(0, 1, 5, 2), (1, 2, 4, 2), (0, 2, 3, 0)])]
    #[case(vec![(0, 1, 5, 3), (1, 0, 4, 1), (0, 1, 2, 2)])]
    #[case(vec![(0, 0, 3, 1), (2, 1, 6, 6), (1, 2, 1, 1)])]
    fn round_trip_keeps_flows(#[case] edges: Vec<(usize, usize, u64, u64)>) {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(3);
        for &(from, to, capacity, flow) in edges.iter() {
            graph.add_out_edge(v[from], v[to], EdgeFlow::new(capacity, flow).unwrap()).unwrap();
        }
        let before: Vec<_> = graph.edges().map(|e| *graph.edge(e).unwrap()).collect();

        let residual = create_residual_graph(&graph).unwrap();
        update_flows_from_residual_graph(&residual, &mut graph).unwrap();

        let after: Vec<_> = graph.edges().map(|e| *graph.edge(e).unwrap()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn single_edge_flow_is_capacity_minus_residual() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(2);
        let edge = graph.add_flow_edge(v[1], v[0], 6).unwrap();

        let mut residual = create_residual_graph(&graph).unwrap();
        let forward = residual.find_edge_between(1, 0).unwrap().unwrap();
        *residual.edge_mut(forward).unwrap() = 2;
        let backward = residual.find_edge_between(0, 1).unwrap().unwrap();
        *residual.edge_mut(backward).unwrap() = 4;

        update_flows_from_residual_graph(&residual, &mut graph).unwrap();
        assert_eq!(graph.edge(edge).unwrap().flow(), 4);
    }

    #[test]
    fn net_flow_cancels_opposite_direction_first() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(2);
        let forward = graph.add_flow_edge(v[0], v[1], 5).unwrap();
        let backward = graph.add_out_edge(v[1], v[0], EdgeFlow::new(3, 2).unwrap()).unwrap();

        let mut residual = create_residual_graph(&graph).unwrap();
        // net flow 0 -> 1 of 4
        let edge = residual.find_edge_between(0, 1).unwrap().unwrap();
        *residual.edge_mut(edge).unwrap() = 1;
        let edge = residual.find_edge_between(1, 0).unwrap().unwrap();
        *residual.edge_mut(edge).unwrap() = 7;

        update_flows_from_residual_graph(&residual, &mut graph).unwrap();
        assert_eq!(graph.edge(backward).unwrap().flow(), 0);
        assert_eq!(graph.edge(forward).unwrap().flow(), 4);
    }

    #[test]
    fn failed_update_leaves_every_flow_untouched() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(3);
        let first = graph.add_flow_edge(v[0], v[1], 5).unwrap();
        let second = graph.add_flow_edge(v[1], v[2], 4).unwrap();

        let mut residual = create_residual_graph(&graph).unwrap();
        let edge = residual.find_edge_between(0, 1).unwrap().unwrap();
        *residual.edge_mut(edge).unwrap() = 2;
        let edge = residual.find_edge_between(1, 2).unwrap().unwrap();
        *residual.edge_mut(edge).unwrap() = 9;

        assert_eq!(update_flows_from_residual_graph(&residual, &mut graph).unwrap_err(), Error::ResidualMismatch { from: 1, to: 2 });
        assert_eq!(graph.edge(first).unwrap().flow(), 0);
        assert_eq!(graph.edge(second).unwrap().flow(), 0);
    }

    #[test]
    fn mismatched_graphs_are_rejected() {
        let mut graph: FlowGraph<u64> = FlowGraph::new();
        let v = graph.add_vertices(2);
        graph.add_flow_edge(v[0], v[1], 1).unwrap();
        let mut residual = create_residual_graph(&graph).unwrap();

        let edge = residual.find_edge_between(0, 1).unwrap().unwrap();
        *residual.edge_mut(edge).unwrap() = 3;
        assert_eq!(update_flows_from_residual_graph(&residual, &mut graph).unwrap_err(), Error::ResidualMismatch { from: 0, to: 1 });

        residual.add_vertex();
        assert_eq!(update_flows_from_residual_graph(&residual, &mut graph).unwrap_err(), Error::VertexCountMismatch { flow: 2, residual: 3 });
    }
}
