pub mod error;
pub mod export;
pub mod graph;
pub mod maximum_flow;

pub use error::{Error, Result};
