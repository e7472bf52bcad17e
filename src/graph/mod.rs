//! Editable graph container for node instances and edges
//!
//! Insertion order is preserved on both lists: the orderer's deterministic
//! tie-break is defined over node insertion order, so the container never
//! reorders behind the caller's back.

pub mod edge;
pub mod node;

pub use edge::{Edge, EdgeId};
pub use node::{NodeId, NodeInstance, Position};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edit-time graph validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node '{0}' already exists in the graph")]
    DuplicateNodeId(String),
    #[error("edge '{edge_id}' references unknown node '{node_id}'")]
    UnknownEndpoint { edge_id: String, node_id: String },
    #[error("edge '{0}' connects a node to itself")]
    SelfLoop(String),
}

/// A model architecture graph: placed nodes plus dataflow edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelGraph {
    pub nodes: Vec<NodeInstance>,
    pub edges: Vec<Edge>,
}

impl ModelGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a node, rejecting duplicate identities
    pub fn add_node(&mut self, node: NodeInstance) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Adds an edge between two existing nodes
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    edge_id: edge.id,
                    node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Removes a node and every edge touching it
    pub fn remove_node(&mut self, id: &str) -> Option<NodeInstance> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        self.edges
            .retain(|edge| edge.source != id && edge.target != id);
        Some(self.nodes.remove(index))
    }

    /// Removes an edge by identity
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Looks up a node by identity
    pub fn node(&self, id: &str) -> Option<&NodeInstance> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Mutable lookup of a node by identity
    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeInstance> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    /// Whether a node with this identity exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
