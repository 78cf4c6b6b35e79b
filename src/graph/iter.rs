use crate::graph::arena::Key;
use crate::graph::directed_graph::{EdgeId, Graph, VertexId};
use std::iter::FusedIterator;

/// Vertices in index order.
pub struct Vertices<'a, V, E> {
    graph: &'a Graph<V, E>,
    keys: std::slice::Iter<'a, Key>,
}

impl<'a, V, E> Vertices<'a, V, E> {
    pub(crate) fn new(graph: &'a Graph<V, E>) -> Self {
        Self { graph, keys: graph.order.iter() }
    }
}

impl<V, E> Iterator for Vertices<'_, V, E> {
    type Item = VertexId;

    #[inline]
    fn next(&mut self) -> Option<VertexId> {
        self.keys.next().map(|&key| VertexId { graph: self.graph.id, key })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<V, E> DoubleEndedIterator for Vertices<'_, V, E> {
    #[inline]
    fn next_back(&mut self) -> Option<VertexId> {
        self.keys.next_back().map(|&key| VertexId { graph: self.graph.id, key })
    }
}

impl<V, E> ExactSizeIterator for Vertices<'_, V, E> {}
impl<V, E> FusedIterator for Vertices<'_, V, E> {}

/// Out-edges of one vertex in list order; `.rev()` walks them backwards.
pub struct OutEdges<'a, V, E> {
    graph: &'a Graph<V, E>,
    front: Option<Key>,
    back: Option<Key>,
    remaining: usize,
}

impl<'a, V, E> OutEdges<'a, V, E> {
    pub(crate) fn new(graph: &'a Graph<V, E>, vertex: Key) -> Self {
        let node = &graph.vertices[vertex];
        Self { graph, front: node.head, back: node.tail, remaining: node.out_degree }
    }
}

impl<V, E> Iterator for OutEdges<'_, V, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front?;
        self.front = self.graph.edges[key].next;
        self.remaining -= 1;
        Some(EdgeId { graph: self.graph.id, key })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, E> DoubleEndedIterator for OutEdges<'_, V, E> {
    fn next_back(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.back?;
        self.back = self.graph.edges[key].prev;
        self.remaining -= 1;
        Some(EdgeId { graph: self.graph.id, key })
    }
}

impl<V, E> ExactSizeIterator for OutEdges<'_, V, E> {}
impl<V, E> FusedIterator for OutEdges<'_, V, E> {}

/// Every edge, grouped by source vertex in index order.
pub struct Edges<'a, V, E> {
    graph: &'a Graph<V, E>,
    vertices: std::slice::Iter<'a, Key>,
    current: Option<OutEdges<'a, V, E>>,
}

impl<'a, V, E> Edges<'a, V, E> {
    pub(crate) fn new(graph: &'a Graph<V, E>) -> Self {
        Self { graph, vertices: graph.order.iter(), current: None }
    }
}

impl<V, E> Iterator for Edges<'_, V, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        loop {
            if let Some(edge) = self.current.as_mut().and_then(Iterator::next) {
                return Some(edge);
            }
            let &vertex = self.vertices.next()?;
            self.current = Some(OutEdges::new(self.graph, vertex));
        }
    }
}

impl<V, E> FusedIterator for Edges<'_, V, E> {}
