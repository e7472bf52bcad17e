//! Code generation pipeline
//!
//! Turns a [`ModelGraph`](crate::graph::ModelGraph) into a runnable PyTorch
//! project in three stages: [`topological_order`] sequences the nodes,
//! [`Generator`] emits the Python sources, and the result lands in an
//! [`ArtifactSet`] ready to inspect or write to disk. The whole pipeline is
//! deterministic, exporting the same graph twice yields byte-identical
//! artifacts.

pub mod artifact;
pub mod emit;
pub mod error;
pub mod order;

pub use artifact::{ArtifactSet, CONFIG_FILE, MODEL_FILE, README_FILE, TRAIN_FILE};
pub use emit::{ExportOptions, Generator, Hyperparameters};
pub use error::{CycleError, ExportError};
pub use order::topological_order;

use crate::catalog::NodeCatalog;
use crate::graph::ModelGraph;
use log::info;

/// Export a graph with default options
pub fn export_graph(
    graph: &ModelGraph,
    catalog: &NodeCatalog,
) -> Result<ArtifactSet, ExportError> {
    export_graph_with(graph, catalog, ExportOptions::default())
}

/// Order the graph, then emit all four artifacts
///
/// Fails without producing anything if the graph contains a cycle or a node
/// whose type the catalog does not know.
pub fn export_graph_with(
    graph: &ModelGraph,
    catalog: &NodeCatalog,
    options: ExportOptions,
) -> Result<ArtifactSet, ExportError> {
    let ordered = topological_order(&graph.nodes, &graph.edges)?;
    info!(
        "Exporting {} nodes, {} edges as '{}'",
        ordered.len(),
        graph.edges.len(),
        options.model_name
    );
    Generator::new(ordered, &graph.edges, catalog)
        .with_options(options)
        .generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, NodeInstance};

    #[test]
    fn test_export_orders_before_emitting() {
        let mut graph = ModelGraph::new();
        // Insertion order reversed on purpose
        graph
            .add_node(NodeInstance::new("r", "relu"))
            .unwrap();
        graph
            .add_node(NodeInstance::new("c", "conv2d"))
            .unwrap();
        graph
            .add_node(NodeInstance::new("i", "input"))
            .unwrap();
        graph.add_edge(Edge::new("e1", "i", "c")).unwrap();
        graph.add_edge(Edge::new("e2", "c", "r")).unwrap();

        let artifacts = export_graph(&graph, NodeCatalog::builtin()).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        let conv = model.find("x = self.conv2d1(x)").unwrap();
        let relu = model.find("x = self.relu1(x)").unwrap();
        assert!(conv < relu);
    }

    #[test]
    fn test_export_cycle_fails() {
        let mut graph = ModelGraph::new();
        graph.add_node(NodeInstance::new("a", "relu")).unwrap();
        graph.add_node(NodeInstance::new("b", "relu")).unwrap();
        graph.add_edge(Edge::new("e1", "a", "b")).unwrap();
        graph.add_edge(Edge::new("e2", "b", "a")).unwrap();

        let err = export_graph(&graph, NodeCatalog::builtin()).unwrap_err();
        assert!(matches!(err, ExportError::Cycle(_)));
    }

    #[test]
    fn test_export_empty_graph_yields_four_artifacts() {
        let graph = ModelGraph::new();
        let artifacts = export_graph(&graph, NodeCatalog::builtin()).unwrap();
        // BTreeMap order is byte order, so README.md leads
        assert_eq!(
            artifacts.names(),
            vec![README_FILE, CONFIG_FILE, MODEL_FILE, TRAIN_FILE]
        );
    }
}
