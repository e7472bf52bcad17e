//! Error taxonomy for the code generation pipeline

use crate::graph::NodeId;
use thiserror::Error;

/// The graph contains at least one dependency cycle
///
/// Carries every node the topological walk could not resolve, in input
/// order, so callers can report or highlight the whole offending group.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("graph contains a cycle involving nodes: {}", nodes.join(", "))]
pub struct CycleError {
    pub nodes: Vec<NodeId>,
}

/// Failure of a whole export
///
/// Any variant means no artifact was produced; the pipeline never returns
/// partial sets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error(transparent)]
    Cycle(#[from] CycleError),

    /// A node references a type identifier absent from the catalog
    #[error("node '{node_id}' has unknown type '{type_id}'")]
    UnknownNodeType { node_id: String, type_id: String },

    /// The configuration artifact could not be serialized
    #[error("failed to assemble configuration artifact: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_names_all_nodes() {
        let err = CycleError {
            nodes: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "graph contains a cycle involving nodes: a, b"
        );
    }

    #[test]
    fn test_cycle_converts_into_export_error() {
        let cycle = CycleError {
            nodes: vec!["loop".to_string()],
        };
        let err: ExportError = cycle.clone().into();
        assert_eq!(err, ExportError::Cycle(cycle));
    }

    #[test]
    fn test_unknown_type_message() {
        let err = ExportError::UnknownNodeType {
            node_id: "n3".to_string(),
            type_id: "Conv2d".to_string(),
        };
        assert_eq!(err.to_string(), "node 'n3' has unknown type 'Conv2d'");
    }
}
