use crate::graph::{EdgeId, VertexId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("vertex {0:?} does not belong to this graph")]
    ForeignVertex(VertexId),
    #[error("edge {0:?} does not belong to this graph")]
    ForeignEdge(EdgeId),
    #[error("vertex index {index} is out of range 0..{bound}")]
    IndexOutOfRange { index: usize, bound: usize },
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: usize, to: usize },
    #[error("edge {edge:?} is not an out-edge of vertex {vertex:?}")]
    NotAnOutEdge { edge: EdgeId, vertex: VertexId },
    #[error("no residual edge {from} -> {to}")]
    MissingEdge { from: usize, to: usize },
    #[error("flow {flow} is outside of [0, {capacity}]")]
    InvalidFlow { flow: String, capacity: String },
    #[error("flow graph has {flow} vertices but residual graph has {residual}")]
    VertexCountMismatch { flow: usize, residual: usize },
    #[error("residual capacity on {from} -> {to} exceeds the capacity between both vertices")]
    ResidualMismatch { from: usize, to: usize },
    #[error("source and sink are the same vertex")]
    SourceIsSink,
    #[error("vertex {0} holds excess but has no residual out-edge")]
    StuckExcess(usize),
    #[error("unknown solver `{0}`")]
    UnknownSolver(String),
    #[error("unknown export format `{0}`")]
    UnknownExportFormat(String),
    #[error("not a flow: {0}")]
    NotAFlow(String),
    #[error("flow value {actual} is not maximum, expected {expected}")]
    NotMaximum { actual: String, expected: String },
    #[error("failed to format export")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
