use crate::error::Result;
use crate::graph::EdgeId;
use crate::maximum_flow::{FlowValue, ResidualGraph};

/// Moves `amount` units of residual capacity from `edge` onto its anti-parallel
/// edge, creating that edge when missing. With `remove_zero_edge` an edge left
/// at zero is destroyed.
///
/// Panics if `amount` exceeds the residual capacity of `edge`.
pub fn augment<Flow: FlowValue>(graph: &mut ResidualGraph<Flow>, edge: EdgeId, amount: Flow, remove_zero_edge: bool) -> Result<()> {
    let (from, to) = graph.edge_indices(edge)?;
    if amount == Flow::zero() || from == to {
        return Ok(());
    }

    let residual = graph.edge_mut(edge)?;
    assert!(*residual >= amount, "augmenting {from} -> {to} by {amount} but only {residual} is left");
    *residual -= amount;
    let exhausted = *residual == Flow::zero();

    match graph.anti_parallel(edge)? {
        Some(reverse) => *graph.edge_mut(reverse)? += amount,
        None => {
            graph.add_out_edge(graph.vertex(to)?, graph.vertex(from)?, amount)?;
        }
    }

    if remove_zero_edge && exhausted {
        graph.destroy_edge(edge)?;
    }
    Ok(())
}

/// Smallest residual capacity along `path`, zero for an empty path.
pub fn bottleneck<Flow: FlowValue>(graph: &ResidualGraph<Flow>, path: &[EdgeId]) -> Result<Flow> {
    let mut result: Option<Flow> = None;
    for &edge in path {
        let residual = *graph.edge(edge)?;
        result = Some(result.map_or(residual, |current| current.min(residual)));
    }
    Ok(result.unwrap_or_else(Flow::zero))
}

/// Augments every edge of `path` by its bottleneck and returns the amount.
pub fn augment_max<Flow: FlowValue>(graph: &mut ResidualGraph<Flow>, path: &[EdgeId], remove_zero_edge: bool) -> Result<Flow> {
    // both passes are separate so the bottleneck is read before anything moves
    let amount = bottleneck(graph, path)?;
    for &edge in path {
        augment(graph, edge, amount, remove_zero_edge)?;
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn chain() -> (ResidualGraph<u64>, Vec<EdgeId>) {
        let mut graph = ResidualGraph::new();
        let v = graph.add_vertices(4);
        graph.set_matrix(true).unwrap();
        let path = vec![
            graph.add_out_edge(v[2], v[3], 4).unwrap(),
            graph.add_out_edge(v[1], v[2], 2).unwrap(),
            graph.add_out_edge(v[0], v[1], 7).unwrap(),
        ];
        graph.add_out_edge(v[2], v[1], 1).unwrap();
        (graph, path)
    }

    #[rstest]
    fn augment_creates_and_grows_reverse_edges(chain: (ResidualGraph<u64>, Vec<EdgeId>)) {
        let (mut graph, path) = chain;
        augment(&mut graph, path[1], 2, false).unwrap();
        assert_eq!(*graph.edge(path[1]).unwrap(), 0);
        let reverse = graph.find_edge_between(2, 1).unwrap().unwrap();
        assert_eq!(*graph.edge(reverse).unwrap(), 3);

        augment(&mut graph, path[0], 1, false).unwrap();
        let created = graph.find_edge_between(3, 2).unwrap().unwrap();
        assert_eq!(*graph.edge(created).unwrap(), 1);
        assert!(graph.is_consistent());
    }

    #[rstest]
    fn augment_max_pushes_the_bottleneck(chain: (ResidualGraph<u64>, Vec<EdgeId>)) {
        let (mut graph, path) = chain;
        assert_eq!(bottleneck(&graph, &path).unwrap(), 2);
        assert_eq!(augment_max(&mut graph, &path, true).unwrap(), 2);

        assert!(!graph.contains_edge(path[1]));
        assert_eq!(graph.find_edge_between(1, 2).unwrap(), None);
        assert_eq!(*graph.edge(path[0]).unwrap(), 2);
        assert_eq!(*graph.edge(path[2]).unwrap(), 5);
        assert_eq!(graph.num_edges(), 5);
    }

    #[rstest]
    fn empty_path_moves_nothing(chain: (ResidualGraph<u64>, Vec<EdgeId>)) {
        let (mut graph, _) = chain;
        assert_eq!(augment_max(&mut graph, &[], true).unwrap(), 0);
        assert_eq!(graph.num_edges(), 4);
    }

    #[rstest]
    #[should_panic]
    fn augmenting_beyond_the_residual_panics(chain: (ResidualGraph<u64>, Vec<EdgeId>)) {
        let (mut graph, path) = chain;
        let _ = augment(&mut graph, path[1], 3, false);
    }
}
