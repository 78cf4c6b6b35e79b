use crate::error::{Error, Result};
use crate::graph::adjacency_matrix::AdjacencyMatrix;
use crate::graph::arena::{Arena, Key};
use crate::graph::iter::{Edges, OutEdges, Vertices};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_GRAPH_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct GraphId(usize);

impl GraphId {
    fn next() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a vertex. It survives index renumbering and is rejected once the
/// vertex is destroyed or when presented to another graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId {
    pub(crate) graph: GraphId,
    pub(crate) key: Key,
}

/// Handle to an edge, see [`VertexId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId {
    pub(crate) graph: GraphId,
    pub(crate) key: Key,
}

#[derive(Clone, Debug)]
pub(crate) struct VertexNode<V> {
    pub(crate) index: usize,
    pub(crate) head: Option<Key>,
    pub(crate) tail: Option<Key>,
    pub(crate) out_degree: usize,
    pub(crate) payload: V,
}

#[derive(Clone, Debug)]
pub(crate) struct EdgeNode<E> {
    pub(crate) from: Key,
    pub(crate) to: Key,
    pub(crate) prev: Option<Key>,
    pub(crate) next: Option<Key>,
    pub(crate) payload: E,
}

/// Directed graph with per-vertex doubly-linked out-edge lists.
///
/// Vertices are ordered; `vertex_index` is always a dense `0..num_vertices()`
/// permutation and is renumbered on every insertion, removal and swap. In
/// matrix mode an `O(V^2)` table answers edge lookups in `O(1)` and rejects
/// parallel edges.
#[derive(Debug)]
pub struct Graph<V = (), E = ()> {
    pub(crate) id: GraphId,
    pub(crate) vertices: Arena<VertexNode<V>>,
    pub(crate) edges: Arena<EdgeNode<E>>,
    pub(crate) order: Vec<Key>,
    matrix: Option<AdjacencyMatrix>,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

// a clone is a different graph: its handles are not interchangeable with ours
impl<V: Clone, E: Clone> Clone for Graph<V, E> {
    fn clone(&self) -> Self {
        Self { id: GraphId::next(), vertices: self.vertices.clone(), edges: self.edges.clone(), order: self.order.clone(), matrix: self.matrix.clone() }
    }
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self { id: GraphId::next(), vertices: Arena::default(), edges: Arena::default(), order: Vec::new(), matrix: None }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn has_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    /// Builds (O(V^2) + O(E)) or drops the adjacency matrix. Matrix mode
    /// holds at most one edge per vertex pair, so enabling it over parallel
    /// edges fails with `DuplicateEdge` and leaves the graph in list mode.
    pub fn set_matrix(&mut self, enabled: bool) -> Result<()> {
        if !enabled {
            self.matrix = None;
            return Ok(());
        }
        if self.matrix.is_some() {
            return Ok(());
        }

        let mut matrix = AdjacencyMatrix::new(self.order.len());
        for (from, &vertex) in self.order.iter().enumerate() {
            let mut cursor = self.vertices[vertex].head;
            while let Some(edge) = cursor {
                let node = &self.edges[edge];
                let to = self.vertices[node.to].index;
                if matrix.get(from, to).is_some() {
                    return Err(Error::DuplicateEdge { from, to });
                }
                matrix.set(from, to, Some(edge));
                cursor = node.next;
            }
        }
        self.matrix = Some(matrix);
        Ok(())
    }

    #[inline]
    fn vertex_handle(&self, key: Key) -> VertexId {
        VertexId { graph: self.id, key }
    }

    #[inline]
    fn edge_handle(&self, key: Key) -> EdgeId {
        EdgeId { graph: self.id, key }
    }

    #[inline]
    fn vertex_key(&self, vertex: VertexId) -> Result<Key> {
        if vertex.graph == self.id && self.vertices.contains(vertex.key) {
            Ok(vertex.key)
        } else {
            Err(Error::ForeignVertex(vertex))
        }
    }

    #[inline]
    fn edge_key(&self, edge: EdgeId) -> Result<Key> {
        if edge.graph == self.id && self.edges.contains(edge.key) {
            Ok(edge.key)
        } else {
            Err(Error::ForeignEdge(edge))
        }
    }

    #[inline]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertex_key(vertex).is_ok()
    }

    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edge_key(edge).is_ok()
    }

    // vertices

    #[inline]
    pub fn vertex(&self, index: usize) -> Result<VertexId> {
        self.order.get(index).map(|&key| self.vertex_handle(key)).ok_or(Error::IndexOutOfRange { index, bound: self.order.len() })
    }

    #[inline]
    pub fn vertex_index(&self, vertex: VertexId) -> Result<usize> {
        Ok(self.vertices[self.vertex_key(vertex)?].index)
    }

    pub fn vertex_payload(&self, vertex: VertexId) -> Result<&V> {
        Ok(&self.vertices[self.vertex_key(vertex)?].payload)
    }

    pub fn vertex_payload_mut(&mut self, vertex: VertexId) -> Result<&mut V> {
        let key = self.vertex_key(vertex)?;
        Ok(&mut self.vertices[key].payload)
    }

    pub fn out_degree(&self, vertex: VertexId) -> Result<usize> {
        Ok(self.vertices[self.vertex_key(vertex)?].out_degree)
    }

    pub fn vertices(&self) -> Vertices<'_, V, E> {
        Vertices::new(self)
    }

    pub fn add_vertex(&mut self) -> VertexId
    where
        V: Default,
    {
        self.insert_vertex(self.order.len(), V::default())
    }

    pub fn add_vertex_with(&mut self, payload: V) -> VertexId {
        self.insert_vertex(self.order.len(), payload)
    }

    pub fn add_vertex_before(&mut self, index: usize) -> Result<VertexId>
    where
        V: Default,
    {
        self.add_vertex_before_with(index, V::default())
    }

    pub fn add_vertex_before_with(&mut self, index: usize, payload: V) -> Result<VertexId> {
        self.check_insert_position(index)?;
        Ok(self.insert_vertex(index, payload))
    }

    pub fn add_vertices(&mut self, count: usize) -> Vec<VertexId>
    where
        V: Default,
    {
        (0..count).map(|_| self.insert_vertex(self.order.len(), V::default())).collect()
    }

    pub fn add_vertices_before(&mut self, index: usize, count: usize) -> Result<Vec<VertexId>>
    where
        V: Default,
    {
        self.check_insert_position(index)?;
        Ok((index..index + count).map(|position| self.insert_vertex(position, V::default())).collect())
    }

    #[inline]
    fn check_insert_position(&self, index: usize) -> Result<()> {
        if index > self.order.len() {
            return Err(Error::IndexOutOfRange { index, bound: self.order.len() + 1 });
        }
        Ok(())
    }

    fn insert_vertex(&mut self, index: usize, payload: V) -> VertexId {
        let key = self.vertices.insert(VertexNode { index, head: None, tail: None, out_degree: 0, payload });
        self.order.insert(index, key);
        self.reindex_from(index + 1);
        if let Some(matrix) = &mut self.matrix {
            matrix.insert_vertex(index);
        }
        self.vertex_handle(key)
    }

    fn reindex_from(&mut self, start: usize) {
        for position in start..self.order.len() {
            let key = self.order[position];
            self.vertices[key].index = position;
        }
    }

    /// Destroys the vertex together with its out-edges and every edge pointing
    /// to it, then shifts the indices of all later vertices down by one.
    pub fn destroy_vertex(&mut self, vertex: VertexId) -> Result<V> {
        let key = self.vertex_key(vertex)?;
        let index = self.vertices[key].index;

        // out-edges; the matrix row goes away with the vertex
        let mut cursor = self.vertices[key].head;
        while let Some(edge) = cursor {
            cursor = self.edges[edge].next;
            self.edges.remove(edge);
        }

        // in-edges
        for position in 0..self.order.len() {
            if position == index {
                continue;
            }
            match self.matrix.as_ref().map(|matrix| matrix.get(position, index)) {
                Some(Some(edge)) => {
                    self.unlink_edge(edge);
                }
                Some(None) => {}
                None => {
                    let mut cursor = self.vertices[self.order[position]].head;
                    while let Some(edge) = cursor {
                        cursor = self.edges[edge].next;
                        if self.edges[edge].to == key {
                            self.unlink_edge(edge);
                        }
                    }
                }
            }
        }

        self.order.remove(index);
        self.reindex_from(index);
        if let Some(matrix) = &mut self.matrix {
            matrix.remove_vertex(index);
        }
        self.vertices.remove(key).map(|node| node.payload).ok_or(Error::ForeignVertex(vertex))
    }

    /// Exchanges the indices of two vertices. Edges keep their endpoints.
    pub fn swap_vertices(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        let (key_a, key_b) = (self.vertex_key(a)?, self.vertex_key(b)?);
        let (index_a, index_b) = (self.vertices[key_a].index, self.vertices[key_b].index);
        if index_a == index_b {
            return Ok(());
        }

        self.order.swap(index_a, index_b);
        self.vertices[key_a].index = index_b;
        self.vertices[key_b].index = index_a;
        if let Some(matrix) = &mut self.matrix {
            matrix.swap_vertices(index_a, index_b);
        }
        Ok(())
    }

    // edges

    pub fn add_out_edge(&mut self, from: VertexId, to: VertexId, payload: E) -> Result<EdgeId> {
        let (from_key, to_key) = (self.vertex_key(from)?, self.vertex_key(to)?);
        self.check_duplicate(from_key, to_key)?;

        let tail = self.vertices[from_key].tail;
        let key = self.edges.insert(EdgeNode { from: from_key, to: to_key, prev: tail, next: None, payload });
        match tail {
            Some(tail) => self.edges[tail].next = Some(key),
            None => self.vertices[from_key].head = Some(key),
        }
        let node = &mut self.vertices[from_key];
        node.tail = Some(key);
        node.out_degree += 1;

        self.record_in_matrix(from_key, to_key, key);
        Ok(self.edge_handle(key))
    }

    /// Inserts the new edge into `from`'s list right before `next`.
    pub fn add_out_edge_before(&mut self, from: VertexId, to: VertexId, next: EdgeId, payload: E) -> Result<EdgeId> {
        let (from_key, to_key) = (self.vertex_key(from)?, self.vertex_key(to)?);
        let next_key = self.edge_key(next)?;
        if self.edges[next_key].from != from_key {
            return Err(Error::NotAnOutEdge { edge: next, vertex: from });
        }
        self.check_duplicate(from_key, to_key)?;

        let prev = self.edges[next_key].prev;
        let key = self.edges.insert(EdgeNode { from: from_key, to: to_key, prev, next: Some(next_key), payload });
        self.edges[next_key].prev = Some(key);
        match prev {
            Some(prev) => self.edges[prev].next = Some(key),
            None => self.vertices[from_key].head = Some(key),
        }
        self.vertices[from_key].out_degree += 1;

        self.record_in_matrix(from_key, to_key, key);
        Ok(self.edge_handle(key))
    }

    fn check_duplicate(&self, from: Key, to: Key) -> Result<()> {
        if let Some(matrix) = &self.matrix {
            let (from, to) = (self.vertices[from].index, self.vertices[to].index);
            if matrix.get(from, to).is_some() {
                return Err(Error::DuplicateEdge { from, to });
            }
        }
        Ok(())
    }

    fn record_in_matrix(&mut self, from: Key, to: Key, edge: Key) {
        if let Some(matrix) = &mut self.matrix {
            matrix.set(self.vertices[from].index, self.vertices[to].index, Some(edge));
        }
    }

    pub fn destroy_edge(&mut self, edge: EdgeId) -> Result<E> {
        let key = self.edge_key(edge)?;
        self.unlink_edge(key).map(|node| node.payload).ok_or(Error::ForeignEdge(edge))
    }

    // O(1)
    fn unlink_edge(&mut self, key: Key) -> Option<EdgeNode<E>> {
        let node = self.edges.remove(key)?;
        match node.prev {
            Some(prev) => self.edges[prev].next = node.next,
            None => self.vertices[node.from].head = node.next,
        }
        match node.next {
            Some(next) => self.edges[next].prev = node.prev,
            None => self.vertices[node.from].tail = node.prev,
        }
        self.vertices[node.from].out_degree -= 1;

        if let Some(matrix) = &mut self.matrix {
            let (from, to) = (self.vertices[node.from].index, self.vertices[node.to].index);
            if matrix.get(from, to) == Some(key) {
                matrix.set(from, to, None);
            }
        }
        Some(node)
    }

    pub fn edge(&self, edge: EdgeId) -> Result<&E> {
        Ok(&self.edges[self.edge_key(edge)?].payload)
    }

    pub fn edge_mut(&mut self, edge: EdgeId) -> Result<&mut E> {
        let key = self.edge_key(edge)?;
        Ok(&mut self.edges[key].payload)
    }

    pub fn edge_source(&self, edge: EdgeId) -> Result<VertexId> {
        Ok(self.vertex_handle(self.edges[self.edge_key(edge)?].from))
    }

    pub fn edge_target(&self, edge: EdgeId) -> Result<VertexId> {
        Ok(self.vertex_handle(self.edges[self.edge_key(edge)?].to))
    }

    #[inline]
    pub fn edge_source_index(&self, edge: EdgeId) -> Result<usize> {
        Ok(self.vertices[self.edges[self.edge_key(edge)?].from].index)
    }

    #[inline]
    pub fn edge_target_index(&self, edge: EdgeId) -> Result<usize> {
        Ok(self.vertices[self.edges[self.edge_key(edge)?].to].index)
    }

    /// `(from index, to index)`
    #[inline]
    pub fn edge_indices(&self, edge: EdgeId) -> Result<(usize, usize)> {
        let node = &self.edges[self.edge_key(edge)?];
        Ok((self.vertices[node.from].index, self.vertices[node.to].index))
    }

    /// O(1) in matrix mode, otherwise a scan of `from`'s out-edges.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Result<Option<EdgeId>> {
        let (from, to) = (self.vertex_key(from)?, self.vertex_key(to)?);
        Ok(self.find_edge_key(from, to).map(|key| self.edge_handle(key)))
    }

    pub fn find_edge_between(&self, from: usize, to: usize) -> Result<Option<EdgeId>> {
        let (from, to) = (self.vertex(from)?, self.vertex(to)?);
        self.find_edge(from, to)
    }

    /// The edge running the opposite way between the same two vertices.
    pub fn anti_parallel(&self, edge: EdgeId) -> Result<Option<EdgeId>> {
        let node = &self.edges[self.edge_key(edge)?];
        Ok(self.find_edge_key(node.to, node.from).map(|key| self.edge_handle(key)))
    }

    fn find_edge_key(&self, from: Key, to: Key) -> Option<Key> {
        if let Some(matrix) = &self.matrix {
            return matrix.get(self.vertices[from].index, self.vertices[to].index);
        }

        let mut cursor = self.vertices[from].head;
        while let Some(edge) = cursor {
            let node = &self.edges[edge];
            if node.to == to {
                return Some(edge);
            }
            cursor = node.next;
        }
        None
    }

    pub fn out_edges(&self, vertex: VertexId) -> Result<OutEdges<'_, V, E>> {
        let key = self.vertex_key(vertex)?;
        Ok(OutEdges::new(self, key))
    }

    pub fn edges(&self) -> Edges<'_, V, E> {
        Edges::new(self)
    }

    // cursors, for erase-while-iterating: fetch the neighbour before destroying

    pub fn first_out_edge(&self, vertex: VertexId) -> Result<Option<EdgeId>> {
        Ok(self.vertices[self.vertex_key(vertex)?].head.map(|key| self.edge_handle(key)))
    }

    pub fn last_out_edge(&self, vertex: VertexId) -> Result<Option<EdgeId>> {
        Ok(self.vertices[self.vertex_key(vertex)?].tail.map(|key| self.edge_handle(key)))
    }

    pub fn next_out_edge(&self, edge: EdgeId) -> Result<Option<EdgeId>> {
        Ok(self.edges[self.edge_key(edge)?].next.map(|key| self.edge_handle(key)))
    }

    pub fn prev_out_edge(&self, edge: EdgeId) -> Result<Option<EdgeId>> {
        Ok(self.edges[self.edge_key(edge)?].prev.map(|key| self.edge_handle(key)))
    }

    /// Checks index order, list links, degree counters and, in matrix mode,
    /// that every matrix cell agrees with a scan of the out-edge list.
    pub fn is_consistent(&self) -> bool {
        let mut num_edges = 0;
        for (position, &vertex) in self.order.iter().enumerate() {
            let Some(node) = self.vertices.get(vertex) else {
                return false;
            };
            if node.index != position {
                return false;
            }

            let mut expected_row = vec![None; self.order.len()];
            let mut degree = 0;
            let mut prev = None;
            let mut cursor = node.head;
            while let Some(edge) = cursor {
                let Some(edge_node) = self.edges.get(edge) else {
                    return false;
                };
                let Some(target) = self.vertices.get(edge_node.to) else {
                    return false;
                };
                if edge_node.from != vertex || edge_node.prev != prev {
                    return false;
                }
                if self.matrix.is_some() && expected_row[target.index].is_some() {
                    return false;
                }
                expected_row[target.index] = expected_row[target.index].or(Some(edge));
                degree += 1;
                prev = Some(edge);
                cursor = edge_node.next;
            }
            if node.tail != prev || node.out_degree != degree {
                return false;
            }
            num_edges += degree;

            if let Some(matrix) = &self.matrix {
                if matrix.row(position) != expected_row.as_slice() {
                    return false;
                }
            }
        }
        num_edges == self.edges.len() && self.order.len() == self.vertices.len()
    }
}
