//! Node instances placed on the canvas

use crate::catalog::{ParamMap, ParamValue};
use serde::{Deserialize, Serialize};

/// Unique identity of a node instance within a graph
pub type NodeId = String;

/// Canvas coordinates, carried through persistence for the editing surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One placed node: identity, catalog type, display label, parameters
///
/// Parameters hold only the keys the user has set; resolution against the
/// catalog's declared defaults happens at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    pub id: NodeId,
    pub type_id: String,
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub params: ParamMap,
}

impl NodeInstance {
    /// Creates an instance with the label defaulting to the type identifier
    pub fn new(id: impl Into<String>, type_id: impl Into<String>) -> Self {
        let type_id = type_id.into();
        Self {
            id: id.into(),
            label: type_id.clone(),
            type_id,
            position: Position::default(),
            params: ParamMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let node = NodeInstance::new("conv1", "conv2d")
            .with_label("Conv2d")
            .with_position(100.0, 180.0)
            .with_param("in_channels", 1)
            .with_param("out_channels", 32);
        assert_eq!(node.id, "conv1");
        assert_eq!(node.type_id, "conv2d");
        assert_eq!(node.label, "Conv2d");
        assert_eq!(node.position, Position::new(100.0, 180.0));
        assert_eq!(node.params.number("in_channels"), Some(1.0));
        assert_eq!(node.params.number("out_channels"), Some(32.0));
    }

    #[test]
    fn test_label_defaults_to_type() {
        let node = NodeInstance::new("r1", "relu");
        assert_eq!(node.label, "relu");
    }

    #[test]
    fn test_serde_defaults_position_and_params() {
        let node: NodeInstance =
            serde_json::from_str(r#"{"id": "a", "type_id": "relu", "label": "ReLU"}"#).unwrap();
        assert_eq!(node.position, Position::default());
        assert!(node.params.is_empty());
    }
}
