use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::maximum_flow::{FlowGraph, FlowValue, ResidualGraph};
use std::fmt::{self, Display, Write};
use std::str::FromStr;

/// Text formats for dumping a graph while debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// `digraph { ... }` for GraphViz.
    GraphViz,
    /// A `vertices edges` header followed by one `from to label` line per edge.
    EdgeList,
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::GraphViz => f.write_str("dot"),
            ExportFormat::EdgeList => f.write_str("edges"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dot" | "graphviz" => Ok(ExportFormat::GraphViz),
            "edges" | "edge-list" => Ok(ExportFormat::EdgeList),
            _ => Err(Error::UnknownExportFormat(s.to_string())),
        }
    }
}

pub fn export_graph<V, E, F>(graph: &Graph<V, E>, format: ExportFormat, mut label: F) -> Result<String>
where
    F: FnMut(&E) -> String,
{
    let mut out = String::new();
    match format {
        ExportFormat::GraphViz => {
            writeln!(out, "digraph {{")?;
            for v in 0..graph.num_vertices() {
                writeln!(out, "    {v};")?;
            }
            for edge in graph.edges() {
                let (from, to) = graph.edge_indices(edge)?;
                writeln!(out, "    {from} -> {to} [label=\"{}\"];", label(graph.edge(edge)?))?;
            }
            writeln!(out, "}}")?;
        }
        ExportFormat::EdgeList => {
            writeln!(out, "{} {}", graph.num_vertices(), graph.num_edges())?;
            for edge in graph.edges() {
                let (from, to) = graph.edge_indices(edge)?;
                writeln!(out, "{from} {to} {}", label(graph.edge(edge)?))?;
            }
        }
    }
    Ok(out)
}

/// Edges labeled `flow/capacity`.
pub fn export_flow_graph<V, Flow: FlowValue>(graph: &FlowGraph<Flow, V>, format: ExportFormat) -> Result<String> {
    export_graph(graph, format, |edge| format!("{}/{}", edge.flow(), edge.capacity()))
}

/// Edges labeled with their residual capacity.
pub fn export_residual_graph<Flow: FlowValue>(graph: &ResidualGraph<Flow>, format: ExportFormat) -> Result<String> {
    export_graph(graph, format, |residual| residual.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::residual_graph::create_residual_graph;
    use crate::maximum_flow::EdgeFlow;
    use rstest::*;

    fn graph() -> FlowGraph<u32> {
        let mut graph = FlowGraph::new();
        let v = graph.add_vertices(3);
        graph.add_out_edge(v[0], v[1], EdgeFlow::new(4, 3).unwrap()).unwrap();
        graph.add_out_edge(v[1], v[2], EdgeFlow::new(3, 3).unwrap()).unwrap();
        graph
    }

    #[test]
    fn graphviz_labels_flow_over_capacity() {
        let text = export_flow_graph(&graph(), ExportFormat::GraphViz).unwrap();
        assert_eq!(text, "digraph {\n    0;\n    1;\n    2;\n    0 -> 1 [label=\"3/4\"];\n    1 -> 2 [label=\"3/3\"];\n}\n");
    }

    #[test]
    fn edge_list_of_residual_graph() {
        let residual = create_residual_graph(&graph()).unwrap();
        let text = export_residual_graph(&residual, ExportFormat::EdgeList).unwrap();
        assert_eq!(text, "3 4\n0 1 1\n1 0 3\n1 2 0\n2 1 3\n");
    }

    #[rstest]
    #[case("dot", ExportFormat::GraphViz)]
    #[case("graphviz", ExportFormat::GraphViz)]
    #[case("edges", ExportFormat::EdgeList)]
    #[case("edge-list", ExportFormat::EdgeList)]
    fn parses_format_names(#[case] name: &str, #[case] format: ExportFormat) {
        assert_eq!(name.parse::<ExportFormat>().unwrap(), format);
        assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
    }

    #[test]
    fn unknown_format_fails() {
        assert_eq!("svg".parse::<ExportFormat>().unwrap_err(), Error::UnknownExportFormat("svg".to_string()));
    }
}
