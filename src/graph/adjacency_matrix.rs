use crate::graph::arena::Key;

// rows[from][to] holds the edge from -> to, both indexed by vertex index
#[derive(Clone, Debug, Default)]
pub(crate) struct AdjacencyMatrix {
    rows: Vec<Vec<Option<Key>>>,
}

impl AdjacencyMatrix {
    pub fn new(num_vertices: usize) -> Self {
        Self { rows: vec![vec![None; num_vertices]; num_vertices] }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Option<Key> {
        self.rows[from][to]
    }

    #[inline]
    pub fn set(&mut self, from: usize, to: usize, edge: Option<Key>) {
        self.rows[from][to] = edge;
    }

    #[inline]
    pub fn row(&self, from: usize) -> &[Option<Key>] {
        &self.rows[from]
    }

    // O(n)
    pub fn insert_vertex(&mut self, at: usize) {
        for row in self.rows.iter_mut() {
            row.insert(at, None);
        }
        let num_vertices = self.rows.len() + 1;
        self.rows.insert(at, vec![None; num_vertices]);
    }

    // O(n)
    pub fn remove_vertex(&mut self, at: usize) {
        self.rows.remove(at);
        for row in self.rows.iter_mut() {
            row.remove(at);
        }
    }

    // O(n)
    pub fn swap_vertices(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
        for row in self.rows.iter_mut() {
            row.swap(a, b);
        }
    }
}
