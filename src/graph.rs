mod adjacency_matrix;
mod arena;
mod directed_graph;
mod iter;

pub use directed_graph::{EdgeId, Graph, VertexId};
pub use iter::{Edges, OutEdges, Vertices};
