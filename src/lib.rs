//! Blockforge core library
//!
//! Graph compiler for a node-based neural network architecture editor:
//! users wire layer nodes into a dataflow graph and Blockforge turns the
//! graph into a runnable PyTorch project (`model.py`, `train.py`,
//! `config.json`, `README.md`).
//!
//! The pieces compose left to right: a [`catalog::NodeCatalog`] says what
//! node types exist, a [`graph::ModelGraph`] holds placed instances and
//! connections, and [`codegen::export_graph`] orders the graph and emits
//! the artifacts.

// Public modules
pub mod catalog;
pub mod codegen;
pub mod examples;
pub mod graph;
pub mod nodes;
pub mod project;

// Re-export commonly used types
pub use catalog::{NodeCatalog, NodeDefinition, NodeRole, ParamMap, ParamValue};
pub use codegen::{export_graph, export_graph_with, ArtifactSet, ExportError, ExportOptions};
pub use graph::{Edge, ModelGraph, NodeInstance};
pub use project::{Project, ProjectStore};
